//! Player message handlers.
//!
//! All player commands (UI buttons, keyboard shortcuts) funnel through
//! `handle_player()` so behavior is identical regardless of entry point.

use iced::Task;

use crate::config;
use crate::ui::messages::Message;
use crate::ui::state::LoadedState;

/// Handle player-related messages.
pub fn handle_player(s: &mut LoadedState, msg: Message) -> Task<Message> {
    match msg {
        Message::PlayerTick => {
            if let Some(player) = &mut s.player {
                player.tick();
            }
            // Piggyback toast housekeeping on the slow tick
            s.toasts.remove_expired();
        }

        Message::VisualizationTick => {
            let playing = s.player.as_ref().is_some_and(|p| p.is_playing());
            if playing {
                s.bars.advance();
            } else {
                s.bars.settle();
            }
        }

        Message::PlayerToggle => {
            if let Some(player) = &mut s.player {
                player.toggle_play_pause();
            }
        }

        Message::PlayerNext => {
            if let Some(player) = &mut s.player {
                player.next();
            }
        }

        Message::PlayerPrevious => {
            if let Some(player) = &mut s.player {
                player.prev();
            }
        }

        Message::PlayerSelectTrack(index) => {
            if let Some(player) = &mut s.player {
                player.select_track(index);
            }
        }

        Message::PlayerSeekPreview(fraction) => {
            s.seek_preview = Some(fraction);
        }

        Message::PlayerSeekRelease => {
            let preview = s.seek_preview.take();
            if let (Some(player), Some(fraction)) = (&mut s.player, preview)
                && let Some(duration) = player.playback().duration
            {
                player.seek(duration.mul_f32(fraction));
            }
        }

        Message::PlayerVolumeChanged(volume) => {
            if let Some(player) = &mut s.player {
                player.set_volume(volume);
                s.config.player.volume = player.playback().volume;
            }
        }

        Message::PlayerVolumeCommit => {
            return save_config(s);
        }

        Message::PlayerToggleMini => {
            if let Some(player) = &mut s.player {
                player.toggle_mini();
                s.config.player.start_mini =
                    player.view().mode == crate::player::ViewMode::Mini;
                return save_config(s);
            }
        }

        Message::PlayerTogglePlaylist => {
            if let Some(player) = &mut s.player {
                player.toggle_playlist_panel();
            }
        }

        Message::PlayerToggleVolume => {
            if let Some(player) = &mut s.player {
                player.toggle_volume_panel();
            }
        }

        Message::PlayerDismissError => {
            if let Some(player) = &mut s.player {
                player.dismiss_error();
            }
        }

        _ => {}
    }
    Task::none()
}

/// Persist the current config in the background.
fn save_config(s: &LoadedState) -> Task<Message> {
    Task::perform(config::save_async(s.config.clone()), |result| {
        Message::ConfigSaved(result.map_err(|e| e.to_string()))
    })
}
