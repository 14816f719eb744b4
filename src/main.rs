//! Pokedex GraphQL server binary
//!
//! Loads configuration (file, environment, `.env`), applies command-line
//! overrides and serves the GraphQL endpoint.

use clap::Parser;
use pokedex::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "pokedex-graphql", version, about = "GraphQL endpoint over a bundled Pokémon dataset")]
struct Args {
    /// Port to listen on (overrides configuration)
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Address to bind (overrides configuration)
    #[arg(long)]
    bind: Option<String>,

    /// Print the GraphQL schema and exit
    #[arg(long)]
    print_schema: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if args.print_schema {
        println!("{}", pokedex::export_sdl());
        return Ok(());
    }

    let mut config = ServerConfig::load()?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    pokedex::start_server(config).await?;

    Ok(())
}
