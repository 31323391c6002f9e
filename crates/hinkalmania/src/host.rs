use bevy::log::info;
use bevy::prelude::{Mut, NextState, State, World};
use bits_helpers::HostCommandHandler;

use crate::core::GameState;
use crate::gameplay::announce_round_end;
use crate::progress::Progress;
use crate::session::{RoundEndReason, Session};
use crate::store::ProgressStore;

#[derive(Default, Clone, Copy)]
pub struct Hinkalmania;

impl HostCommandHandler for Hinkalmania {
    fn start(world: &mut World) {
        let state = world.resource::<State<GameState>>().get().clone();
        if state == GameState::Playing {
            return;
        }
        info!("Host started a round");
        world.resource_mut::<Session>().finish();
        world
            .resource_mut::<NextState<GameState>>()
            .set(GameState::Playing);
    }

    fn pause(world: &mut World) {
        if world.resource_mut::<Session>().pause() {
            info!("Round paused by the host");
        }
    }

    fn resume(world: &mut World) {
        if world.resource_mut::<Session>().resume() {
            info!("Round resumed by the host");
        }
    }

    fn end(world: &mut World) {
        world.resource_scope(|world, mut session: Mut<Session>| {
            world.resource_scope(|world, mut progress: Mut<Progress>| {
                let Some(summary) = session.end(RoundEndReason::Abandoned, &mut progress) else {
                    return;
                };
                announce_round_end(&summary, &progress, world.resource::<ProgressStore>());
                world
                    .resource_mut::<NextState<GameState>>()
                    .set(GameState::GameOver);
            });
        });
    }
}
