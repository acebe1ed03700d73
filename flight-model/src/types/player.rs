use serde::Serialize;

use super::model_error::ModelError;

const EMBED_BASE_URL: &str = "https://www.youtube.com/embed/";

/// Videos played by the in-flight music widget, in order.
pub const DEFAULT_VIDEO_IDS: [&str; 4] = [
    "jfKfPfyJRdk",
    "5qap5aO4i9A",
    "DWcJFNfaw9c",
    "lTRiuFIWV54",
];

/// A fixed list of videos played back to back by the embedded player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    video_ids: Vec<String>,
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new(&DEFAULT_VIDEO_IDS)
    }
}

impl Playlist {
    pub fn new(video_ids: &[&str]) -> Self {
        Self {
            video_ids: video_ids.iter().map(|id| id.to_string()).collect(),
        }
    }

    /// Embed URL playing the first video, with the remaining ones queued through
    /// the `playlist` parameter. `None` when the list is empty.
    pub fn embed_url(&self) -> Option<String> {
        let (first, rest) = self.video_ids.split_first()?;
        let mut url = format!("{}{}?autoplay=1&loop=1&enablejsapi=1", EMBED_BASE_URL, first);
        if !rest.is_empty() {
            url.push_str("&playlist=");
            url.push_str(&rest.join(","));
        }
        Some(url)
    }
}

/// Commands understood by the embedded player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Mute,
    UnMute,
}

#[derive(Serialize)]
struct CommandMessage<'a> {
    event: &'a str,
    func: &'a str,
    args: [u8; 0],
}

impl PlayerCommand {
    pub fn func(&self) -> &'static str {
        match self {
            PlayerCommand::Mute => "mute",
            PlayerCommand::UnMute => "unMute",
        }
    }

    /// JSON payload posted to the player window, e.g.
    /// `{"event":"command","func":"mute","args":[]}`.
    pub fn to_message(&self) -> Result<String, ModelError> {
        let message = CommandMessage {
            event: "command",
            func: self.func(),
            args: [],
        };
        Ok(serde_json::to_string(&message)?)
    }
}

/// Whatever hosts the player: launches it and relays commands to it.
pub trait PlayerBridge {
    fn launch(&mut self, url: &str);

    fn post(&mut self, message: &str);
}

/// Open/closed and muted state of the music widget.
#[derive(Debug, Clone)]
pub struct MusicPlayer {
    playlist: Playlist,
    open: bool,
    muted: bool,
    launched: bool,
}

impl MusicPlayer {
    pub fn new(playlist: Playlist) -> Self {
        Self {
            playlist,
            open: false,
            muted: false,
            launched: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Shows the widget. The player itself is launched the first time only.
    /// Returns false when the playlist is empty and nothing could be launched.
    pub fn open<B: PlayerBridge>(&mut self, bridge: &mut B) -> bool {
        if !self.launched {
            let Some(url) = self.playlist.embed_url() else {
                return false;
            };
            bridge.launch(&url);
            self.launched = true;
        }
        self.open = true;
        true
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Flips the audio state and relays the matching command to the player.
    pub fn toggle_mute<B: PlayerBridge>(
        &mut self,
        bridge: &mut B,
    ) -> Result<PlayerCommand, ModelError> {
        let command = if self.muted {
            PlayerCommand::UnMute
        } else {
            PlayerCommand::Mute
        };
        bridge.post(&command.to_message()?);
        self.muted = !self.muted;
        Ok(command)
    }
}
