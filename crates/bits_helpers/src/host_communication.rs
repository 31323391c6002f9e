use std::sync::{Arc, LazyLock};

use bevy::prelude::*;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::MessageEvent;

/// Commands the hosting page (Telegram Mini App shell) can send to a bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostCommand {
    Start,
    Pause,
    Resume,
    End,
}

/// Haptic patterns understood by the host's feedback API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Haptic {
    Light,
    Medium,
    Heavy,
    Success,
    Error,
}

/// Messages a bit sends to the hosting page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
    Ready,
    Haptic { pattern: Haptic },
    RoundEnded { score: u32, coins: u32 },
}

pub static HOST_COMMAND_QUEUE: LazyLock<Arc<Mutex<Vec<HostCommand>>>> =
    LazyLock::new(|| Arc::new(Mutex::new(Vec::new())));

#[cfg(not(target_arch = "wasm32"))]
pub static HOST_MESSAGE_QUEUE: LazyLock<Arc<Mutex<Vec<HostMessage>>>> =
    LazyLock::new(|| Arc::new(Mutex::new(Vec::new())));

#[cfg(target_arch = "wasm32")]
pub fn listen_host_commands() {
    let Some(window) = web_sys::window() else {
        error!("No global `window`, host commands disabled");
        return;
    };
    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        let command: Result<HostCommand, serde_wasm_bindgen::Error> =
            serde_wasm_bindgen::from_value(event.data());

        let Ok(command) = command else {
            debug!("Ignoring unknown host message {:?}", &event.data());
            return;
        };

        HOST_COMMAND_QUEUE.lock().push(command);
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Err(err) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Could not listen to host messages: {err:?}");
        return;
    }

    closure.forget(); // The listener lives as long as the page
}

#[cfg(not(target_arch = "wasm32"))]
pub fn send_host_message(message: HostMessage) {
    HOST_MESSAGE_QUEUE.lock().push(message);
}

#[cfg(target_arch = "wasm32")]
pub fn send_host_message(message: HostMessage) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(value) = serde_wasm_bindgen::to_value(&message) else {
        error!("Could not serialize {message:?}");
        return;
    };

    let Ok(Some(parent_window)) = window.parent() else {
        debug!("{message:?} not sent, no parent window");
        return;
    };

    if let Err(err) = parent_window.post_message(&value, "*") {
        error!("Could not post message {message:?}. {err:?}");
    }
}

/// Reactions of a bit to host commands. Called once per frame for each queued
/// command, never from the bit itself.
pub trait HostCommandHandler: Send + Sync + Default + 'static {
    fn start(world: &mut World);
    fn pause(world: &mut World);
    fn resume(world: &mut World);
    fn end(world: &mut World);
}

fn process_host_commands<T: HostCommandHandler>(world: &mut World) {
    let commands = HOST_COMMAND_QUEUE.lock().drain(..).collect::<Vec<_>>();

    for command in commands {
        debug!("Host command {command:?}");
        match command {
            HostCommand::Start => T::start(world),
            HostCommand::Pause => T::pause(world),
            HostCommand::Resume => T::resume(world),
            HostCommand::End => T::end(world),
        }
    }
}

fn ready() {
    send_host_message(HostMessage::Ready);
}

#[derive(Default)]
pub struct HostBridgePlugin<T: HostCommandHandler>(core::marker::PhantomData<T>);

impl<T: HostCommandHandler> Plugin for HostBridgePlugin<T> {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, process_host_commands::<T>);
        #[cfg(target_arch = "wasm32")]
        {
            app.add_systems(Startup, listen_host_commands);
        }
        app.add_systems(PostStartup, ready);
    }
}
