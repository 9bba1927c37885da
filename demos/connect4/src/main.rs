use bevy::prelude::*;
use bevy_connect4::{ClientConfig, Connect4Plugin};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Connect Four against a friend over the network")]
struct Args {
    /// Page URL to behave as. Its host selects the server; `?join=<id>` joins a
    /// game and `?watch=<id>` spectates one.
    #[arg(short, long, default_value = "http://localhost:8000/")]
    page_url: String,
    /// Nickname sent to the server when the game starts.
    #[arg(short, long)]
    nickname: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = ClientConfig::default().with_page_url(args.page_url);
    if let Some(nickname) = args.nickname {
        config = config.with_nickname(nickname);
    }

    let plugin = Connect4Plugin::new(config)?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Connect Four".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(plugin)
        .add_systems(Startup, setup)
        .run();

    Ok(())
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}
