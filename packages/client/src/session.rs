//! Connection loop of the terminal client.

use burgerclick_server::{
    domain::PlayerName,
    infrastructure::dto::websocket::{ClientMessage, ServerMessage},
};
use burgerclick_shared::time::{get_jst_timestamp, timestamp_to_jst_rfc3339};
use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{
    error::ClientError,
    input::{Command, parse_line},
    render::{render_click, render_scoreboard},
};

/// burgerclick terminal client
#[derive(Parser, Debug, Clone)]
#[command(name = "burgerclick-client", version, about = "burgerclick terminal client")]
pub struct ClientArgs {
    /// WebSocket endpoint of the server
    #[arg(long, env = "BURGERCLICK_URL", default_value = "ws://127.0.0.1:8000/ws")]
    pub url: String,

    /// Player to click for when an empty line is entered
    #[arg(short, long, env = "BURGERCLICK_NAME")]
    pub name: String,
}

/// Connect, then click on every line of input until `/quit` or EOF.
pub async fn run_client(args: ClientArgs) -> Result<(), ClientError> {
    let default_name = PlayerName::new(args.name.clone())?;

    let (socket, _) = connect_async(args.url.as_str()).await?;
    tracing::info!("Connected to {}", args.url);
    println!("Connected as '{default_name}'. Enter = click, <name> = click for name, /quit = exit");

    let (mut sender, mut receiver) = socket.split();

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => print_server_message(text.as_str()),
                Ok(Message::Close(frame)) => {
                    match frame {
                        Some(frame) => println!("Server closed the connection: {}", frame.reason.as_str()),
                        None => println!("Server closed the connection"),
                    }
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            }
        }
    });

    let mut lines = spawn_line_reader().await?;

    loop {
        tokio::select! {
            _ = &mut recv_task => break,
            line = lines.recv() => {
                let Some(line) = line else { break };
                match parse_line(&line, &default_name) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Click(name)) => {
                        let payload = serde_json::to_string(&ClientMessage::Click {
                            name: name.into_string(),
                        })?;
                        sender.send(Message::Text(payload.into())).await?;
                    }
                    Err(e) => println!("Not sent: {e}"),
                }
            }
        }
    }

    recv_task.abort();
    // the server may already be gone
    let _ = sender.close().await;
    Ok(())
}

fn print_server_message(text: &str) {
    match serde_json::from_str::<ServerMessage>(text) {
        Ok(ServerMessage::Scores { scores }) => {
            println!("--- scoreboard ---\n{}", render_scoreboard(&scores));
        }
        Ok(ServerMessage::Click { name, total }) => {
            let at = timestamp_to_jst_rfc3339(get_jst_timestamp());
            println!("{}", render_click(&name, total, &at));
        }
        Err(e) => tracing::debug!("Ignoring unrecognized message: {}", e),
    }
}

/// Read lines on a dedicated thread; the channel closes on EOF or Ctrl+C.
async fn spawn_line_reader() -> Result<mpsc::UnboundedReceiver<String>, ClientError> {
    let (tx, rx) = mpsc::unbounded_channel();
    let (ready_tx, ready_rx) = oneshot::channel();

    std::thread::spawn(move || {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => {
                let _ = ready_tx.send(Ok(()));
                editor
            }
            Err(e) => {
                let _ = ready_tx.send(Err(e));
                return;
            }
        };

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::error!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });

    match ready_rx.await {
        Ok(Ok(())) => Ok(rx),
        Ok(Err(e)) => Err(ClientError::Readline(e)),
        // thread exited before reporting; treat as closed input
        Err(_) => Ok(rx),
    }
}
