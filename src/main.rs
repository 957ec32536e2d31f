use clap::Parser;
use tunescout::{
    cli::Cli,
    config::Config,
    ui::app::App,
    util::{hook::set_panic_hook, log::initialize_logging},
};

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> color_eyre::Result<()> {
    let cli = Cli::parse();
    setup()?;

    let config = Config::load(cli.config.as_deref())?;
    let mut app = App::new(config, cli.launch()).await?;
    app.run().await
}

fn setup() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenv::dotenv().ok();
    set_panic_hook();
    initialize_logging()
}
