use bevy::prelude::*;

use crate::{HOST_COMMAND_QUEUE, HOST_MESSAGE_QUEUE, HostCommand, HostMessage};

/// Stands in for the hosting page on desktop builds: keyboard shortcuts push
/// host commands and outgoing messages are logged instead of posted.
pub struct HostSimulation;

impl Plugin for HostSimulation {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (simulate_host_commands, drain_host_messages));
    }
}

fn simulate_host_commands(keycode: Res<ButtonInput<KeyCode>>) {
    let command = if keycode.just_pressed(KeyCode::KeyS) {
        HostCommand::Start
    } else if keycode.just_pressed(KeyCode::KeyP) {
        HostCommand::Pause
    } else if keycode.just_pressed(KeyCode::KeyR) {
        HostCommand::Resume
    } else if keycode.just_pressed(KeyCode::KeyE) {
        HostCommand::End
    } else {
        return;
    };

    HOST_COMMAND_QUEUE.lock().push(command);
}

fn drain_host_messages() {
    let messages: Vec<_> = HOST_MESSAGE_QUEUE.lock().drain(..).collect();
    for message in messages {
        match message {
            HostMessage::Ready => info!("Host: bit ready"),
            HostMessage::Haptic { pattern } => debug!("Host: haptic {pattern:?}"),
            HostMessage::RoundEnded { score, coins } => {
                info!("Host: round ended with score {score}, balance {coins}");
            }
        }
    }
}
