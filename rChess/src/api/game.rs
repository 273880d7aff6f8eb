//! Game API.

use std::sync::Arc;

use serde::Serialize;

use crate::{
    client::ChessClientInner,
    error::{Error, Result},
    models::{Game, GameId, GameReply, GameSummary, HistoryReply, MoveOutcome, NewGame, ResetReply},
};

/// API for playing against the engine and browsing past games.
pub struct GameApi {
    client: Arc<ChessClientInner>,
}

#[derive(Serialize)]
struct MoveRequest<'a> {
    game_id: &'a str,
    user_move: &'a str,
}

impl GameApi {
    pub(crate) fn new(client: Arc<ChessClientInner>) -> Self {
        Self { client }
    }

    /// Start a new game against the engine.
    pub async fn start(&self) -> Result<NewGame> {
        self.client.executor().post_empty("start_game").await
    }

    /// Reset the engine board to the starting position.
    pub async fn reset(&self) -> Result<ResetReply> {
        self.client.executor().post_empty("reset").await
    }

    /// Play a move in UCI notation (`e2e4`, `e7e8q`) and get the reply.
    pub async fn make_move(&self, game_id: impl Into<GameId>, uci: &str) -> Result<MoveOutcome> {
        let game_id = game_id.into();
        if game_id.is_empty() {
            return Err(Error::invalid("game id must not be empty"));
        }
        let uci = uci.trim();
        if uci.is_empty() {
            return Err(Error::invalid("move must not be empty"));
        }

        let body = MoveRequest {
            game_id: game_id.as_str(),
            user_move: uci,
        };
        self.client.executor().post_json("make_move", &body).await
    }

    /// Games of the current user, newest first.
    pub async fn history(&self) -> Result<Vec<GameSummary>> {
        let reply: HistoryReply = self.client.executor().get_json("game_history").await?;
        Ok(reply.games)
    }

    /// Full record of one game.
    pub async fn get(&self, game_id: impl Into<GameId>) -> Result<Game> {
        let game_id = game_id.into();
        if game_id.is_empty() {
            return Err(Error::invalid("game id must not be empty"));
        }
        if matches!(game_id.as_str(), "." | "..") || game_id.as_str().contains('/') {
            return Err(Error::invalid(format!("malformed game id '{}'", game_id)));
        }

        let mut url = self.client.config.resolve_url("game/")?;
        url.path_segments_mut()
            .map_err(|_| Error::invalid("base URL cannot hold a path"))?
            .pop_if_empty()
            .push(game_id.as_str());

        let reply: GameReply = self.client.executor().get_json(url.as_str()).await?;
        Ok(reply.game)
    }
}
