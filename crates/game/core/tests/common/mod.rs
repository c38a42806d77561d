#![allow(dead_code)]

use adventure_core::{BaseStats, Entity, Flow, GameConfig, Session, Transcript, World};

pub fn session() -> (Session, Transcript) {
    let transcript = Transcript::new();
    let session = Session::new(GameConfig::default(), Box::new(transcript.clone()));
    (session, transcript)
}

pub fn hero() -> Entity {
    Entity::player("Hero", "The hero of this story.", BaseStats::new(50, 5, 1, 6))
}

pub fn goblin() -> Entity {
    Entity::enemy("Goblin", "Small, green and angry.", BaseStats::new(10, 2, 0, 0), 5)
}

pub fn big_goblin() -> Entity {
    Entity::enemy("Big Goblin", "Larger, greener, angrier.", BaseStats::new(15, 3, 0, 0), 10)
}

/// World that does nothing on each step.
pub struct Idle;

impl World for Idle {
    fn step(&mut self, _player: &mut Entity, _session: &mut Session) -> Flow {
        Ok(())
    }
}
