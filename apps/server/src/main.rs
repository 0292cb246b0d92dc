#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bilingual_flashcards_server::run().await
}
