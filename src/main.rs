// One thread: socket, key and draw callbacks all run on the same event loop.
#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    pong_client::run_with_config().await
}
