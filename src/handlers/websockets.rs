use axum::extract::ws::{Message, WebSocket};
use futures::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use std::{sync::Arc, time::Instant};
use tokio::{
    sync::{
        mpsc::{self, UnboundedReceiver, UnboundedSender},
        Mutex,
    },
    task::{JoinError, JoinHandle},
};
use tracing::{debug, info, warn};

use crate::handlers::MessageRouter;
use crate::models::{Game, PlayerId, ServerMessage};

pub struct WebSockets {}

impl WebSockets {
    pub async fn new(ws: WebSocket, game: Arc<Mutex<Game>>) {
        let player_id = PlayerId::generate();
        let (sender, receiver) = ws.split();
        let (ws_sender, ws_receiver) = mpsc::unbounded_channel::<ServerMessage>();
        info!(player_id = %player_id, "Websocket connection established");

        let mut send_task = Self::spawn_sender_task(ws_receiver, sender);
        if ws_sender
            .send(ServerMessage::Connected {
                player_id: player_id.to_string(),
            })
            .is_err()
        {
            warn!(player_id = %player_id, "Failed to queue connected message");
        }

        let mut recv_task = tokio::spawn(Self::receive_messages(
            receiver,
            ws_sender,
            Arc::clone(&game),
            player_id.clone(),
        ));

        let handle_task_completion =
            |task_name: &str, other_task: &mut JoinHandle<()>, result: Result<(), JoinError>| {
                if let Err(e) = result {
                    warn!("{task_name} task encountered an error: {:?}", e);
                }
                other_task.abort();
            };

        tokio::select! {
            result = (&mut send_task) => handle_task_completion("Send", &mut recv_task, result),
            result = (&mut recv_task) => handle_task_completion("Receive", &mut send_task, result),
        };

        Self::cleanup(&game, &player_id).await;
    }

    fn spawn_sender_task(
        mut ws_receiver: UnboundedReceiver<ServerMessage>,
        mut sender: SplitSink<WebSocket, Message>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(message) = ws_receiver.recv().await {
                let text = match message.to_json() {
                    Ok(text) => text,
                    Err(error) => {
                        warn!(%error, "Failed to serialize outbound message");
                        continue;
                    }
                };
                if let Err(error) = sender.send(Message::Text(text)).await {
                    debug!(%error, "Failed to send message");
                    break;
                }
            }
        })
    }

    async fn receive_messages(
        mut receiver: SplitStream<WebSocket>,
        ws_sender: UnboundedSender<ServerMessage>,
        game: Arc<Mutex<Game>>,
        player_id: PlayerId,
    ) {
        while let Some(frame) = receiver.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    let mut game = game.lock().await;
                    MessageRouter::route(
                        &mut game,
                        &player_id,
                        &ws_sender,
                        &text,
                        Instant::now(),
                    );
                }
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(error) => {
                    debug!(player_id = %player_id, %error, "Websocket receive failed");
                    break;
                }
            }
        }
    }

    async fn cleanup(game: &Arc<Mutex<Game>>, player_id: &PlayerId) {
        info!(player_id = %player_id, "Websocket connection closed");
        game.lock().await.remove_player(player_id);
    }
}
