//! Game state and core simulation types
//!
//! The engine instance owns the stack, the phase and the score. Presentation
//! layers only ever see [`BlockSnapshot`]s and [`GameEvent`]s.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::oscillator::speed_for_index;
use super::placement::Footprint;
use super::score::ScoreTracker;
use super::tier::tier_of;
use crate::tuning::{Tuning, TuningError};

/// Horizontal axis a block travels and gets chopped along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    /// The other horizontal axis
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Z,
            Axis::Z => Axis::X,
        }
    }
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Base block only, waiting for `start`
    Ready,
    /// One block active and oscillating
    Playing,
    /// Run ended by a miss
    Ended,
    /// Stack being torn down after `restart`
    Resetting,
}

/// One layer of the tower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Stack position (0 = immovable base)
    pub index: u32,
    pub axis: Axis,
    /// Center position
    pub pos: Vec3,
    /// x = width, y = height, z = depth
    pub size: Vec3,
    /// Oscillation speed (always positive)
    pub speed: f32,
    /// Signed velocity along `axis`, always `±speed`
    pub direction: f32,
    /// Center of the travel window along `axis`
    pub origin: f32,
    pub active: bool,
    pub missed: bool,
}

impl Block {
    /// The immovable base at the origin
    pub fn base(tuning: &Tuning) -> Self {
        Self {
            index: 0,
            // Tagged Z so block 1 travels along X
            axis: Axis::Z,
            pos: Vec3::ZERO,
            size: Vec3::new(tuning.base_width, tuning.block_height, tuning.base_depth),
            speed: 0.0,
            direction: 0.0,
            origin: 0.0,
            active: false,
            missed: false,
        }
    }

    /// Spawn the next active block on top of `top`
    ///
    /// Copies `top`'s footprint, flips the axis and starts at the far end
    /// of the travel window heading back toward the tower.
    pub fn spawn_above(top: &Block, tuning: &Tuning) -> Self {
        let index = top.index + 1;
        let axis = top.axis.other();
        let origin = top.coord(axis);
        let speed = speed_for_index(index, tuning);

        let mut pos = top.pos;
        pos.y = index as f32 * tuning.block_height;
        let mut block = Self {
            index,
            axis,
            pos,
            size: Vec3::new(top.size.x, tuning.block_height, top.size.z),
            speed,
            direction: -speed,
            origin,
            active: true,
            missed: false,
        };
        block.set_coord(axis, origin + tuning.move_range);
        block
    }

    /// Center coordinate along `axis`
    pub fn coord(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.pos.x,
            Axis::Z => self.pos.z,
        }
    }

    pub fn set_coord(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::X => self.pos.x = value,
            Axis::Z => self.pos.z = value,
        }
    }

    /// Footprint length along `axis` (width for X, depth for Z)
    pub fn dimension(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.size.x,
            Axis::Z => self.size.z,
        }
    }

    /// Horizontal footprint of this block
    pub fn footprint(&self) -> Footprint {
        Footprint {
            x: self.pos.x,
            z: self.pos.z,
            width: self.size.x,
            depth: self.size.z,
        }
    }

    /// Resize and recenter to a footprint (height and `y` untouched)
    pub fn apply_footprint(&mut self, footprint: &Footprint) {
        self.pos.x = footprint.x;
        self.pos.z = footprint.z;
        self.size.x = footprint.width;
        self.size.z = footprint.depth;
    }

    /// Immutable view for presentation
    pub fn snapshot(&self) -> BlockSnapshot {
        BlockSnapshot::new(self.index, self.axis, self.pos.y, self.size.y, &self.footprint())
    }
}

/// What a renderer needs to draw a block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockSnapshot {
    pub index: u32,
    pub axis: Axis,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Cosmetic tier bucket (`None` for the base)
    pub tier: Option<u8>,
}

impl BlockSnapshot {
    pub fn new(index: u32, axis: Axis, y: f32, height: f32, footprint: &Footprint) -> Self {
        Self {
            index,
            axis,
            width: footprint.width,
            height,
            depth: footprint.depth,
            x: footprint.x,
            y,
            z: footprint.z,
            tier: tier_of(index),
        }
    }
}

/// Events handed to presentation/audio/network collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Block 1 spawned, run is live
    RunStarted,
    /// A block was kept (chopped or snapped)
    BlockPlaced {
        score: u32,
        block: BlockSnapshot,
        /// Discarded piece, `None` on a perfect drop
        overhang: Option<BlockSnapshot>,
        perfect: bool,
    },
    /// A miss ended the run
    GameOver { final_score: u32 },
    /// Teardown finished, back to Ready
    GameReset,
}

/// Seed wrapper for the idle autopilot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Independent stream per stack level so replays don't depend on frame count
    pub fn rng_for(&self, index: u32) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

/// Complete engine state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) tuning: Tuning,
    pub(crate) rng_state: RngState,
    pub(crate) phase: GamePhase,
    /// Blocks by index; the last one is the active block while Playing
    pub(crate) stack: Vec<Block>,
    /// Block that caused the miss, kept for the fall-off animation
    pub(crate) dropped: Option<Block>,
    pub(crate) score: ScoreTracker,
    /// Seconds since the active block spawned (debounce gate)
    pub(crate) since_spawn: f32,
    /// Teardown time left while Resetting
    pub(crate) reset_timer: f32,
    /// Autopilot target offset for the active block
    pub(crate) idle_aim: f32,
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new engine in `Ready` with just the base block
    ///
    /// Rejects tunings that fail [`Tuning::validate`].
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        let base = Block::base(&tuning);
        Ok(Self {
            tuning,
            rng_state: RngState::new(seed),
            phase: GamePhase::Ready,
            stack: vec![base],
            dropped: None,
            score: ScoreTracker::default(),
            since_spawn: 0.0,
            reset_timer: 0.0,
            idle_aim: 0.0,
            events: Vec::new(),
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn blocks(&self) -> &[Block] {
        &self.stack
    }

    /// The block currently steered by the player, if any
    pub fn active_block(&self) -> Option<&Block> {
        self.stack.last().filter(|b| b.active)
    }

    /// Block that caused the last miss (cleared on reset)
    pub fn dropped_block(&self) -> Option<&Block> {
        self.dropped.as_ref()
    }

    pub fn snapshots(&self) -> impl Iterator<Item = BlockSnapshot> + '_ {
        self.stack.iter().map(Block::snapshot)
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Push a fresh active block on top of the stack
    pub(crate) fn spawn_active(&mut self) {
        let Some(top) = self.stack.last() else {
            return;
        };
        let block = Block::spawn_above(top, &self.tuning);
        self.idle_aim = self.pick_idle_aim(block.index);
        self.since_spawn = 0.0;
        self.stack.push(block);
    }

    fn pick_idle_aim(&self, index: u32) -> f32 {
        use rand::distr::{Distribution, Uniform};

        let err = self.tuning.idle_aim_error;
        if !err.is_finite() || err <= 0.0 {
            return 0.0;
        }
        // Unsampleable ranges aim dead center
        match Uniform::new_inclusive(-err, err) {
            Ok(range) => range.sample(&mut self.rng_state.rng_for(index)),
            Err(_) => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_ready_with_base() {
        let state = GameState::new(1, Tuning::default()).unwrap();
        assert_eq!(state.phase(), GamePhase::Ready);
        assert_eq!(state.blocks().len(), 1);
        assert_eq!(state.blocks()[0].index, 0);
        assert!(state.active_block().is_none());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_spawn_above_base() {
        let tuning = Tuning::default();
        let base = Block::base(&tuning);
        let block = Block::spawn_above(&base, &tuning);

        assert_eq!(block.index, 1);
        assert_eq!(block.axis, Axis::X);
        assert!(block.active);
        assert_eq!(block.pos.x, tuning.move_range);
        assert_eq!(block.pos.y, tuning.block_height);
        assert_eq!(block.pos.z, 0.0);
        assert_eq!(block.origin, 0.0);
        assert_eq!(block.size, base.size);
        assert!(block.direction < 0.0);
        assert_eq!(block.direction, -block.speed);
    }

    #[test]
    fn test_spawn_follows_top_block() {
        let tuning = Tuning::default();
        let mut top = Block::base(&tuning);
        top.index = 4;
        top.axis = Axis::X;
        top.pos = Vec3::new(1.5, 8.0, -2.0);
        top.size = Vec3::new(7.0, 2.0, 6.0);

        let block = Block::spawn_above(&top, &tuning);
        assert_eq!(block.index, 5);
        assert_eq!(block.axis, Axis::Z);
        assert_eq!(block.origin, -2.0);
        assert_eq!(block.pos.z, -2.0 + tuning.move_range);
        assert_eq!(block.pos.x, 1.5);
        assert_eq!(block.pos.y, 10.0);
        assert_eq!(block.size.x, 7.0);
        assert_eq!(block.size.z, 6.0);
    }

    #[test]
    fn test_snapshot_carries_tier() {
        let tuning = Tuning::default();
        let base = Block::base(&tuning);
        assert_eq!(base.snapshot().tier, None);

        let mut block = Block::spawn_above(&base, &tuning);
        block.index = 16;
        let snap = block.snapshot();
        assert_eq!(snap.tier, Some(1));
        assert_eq!(snap.width, block.size.x);
        assert_eq!(snap.depth, block.size.z);
        assert_eq!(snap.height, block.size.y);
    }

    #[test]
    fn test_idle_aim_is_deterministic_and_bounded() {
        let a = GameState::new(42, Tuning::default()).unwrap();
        let b = GameState::new(42, Tuning::default()).unwrap();
        for index in 1..50 {
            let aim = a.pick_idle_aim(index);
            assert_eq!(aim, b.pick_idle_aim(index));
            assert!(aim.abs() <= a.tuning.idle_aim_error);
        }
    }

    #[test]
    fn test_new_rejects_invalid_tuning() {
        let tuning = Tuning {
            move_range: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            GameState::new(1, tuning),
            Err(TuningError::NonPositive { field: "move_range", .. })
        ));

        let tuning = Tuning {
            base_speed: 0.0,
            ..Default::default()
        };
        assert!(GameState::new(1, tuning).is_err());
    }

    #[test]
    fn test_idle_aim_falls_back_on_unsampleable_range() {
        let mut state = GameState::new(3, Tuning::default()).unwrap();
        // Bypasses validation on purpose
        state.tuning.idle_aim_error = 3.0e38;
        assert_eq!(state.pick_idle_aim(1), 0.0);
        state.tuning.idle_aim_error = f32::NAN;
        assert_eq!(state.pick_idle_aim(1), 0.0);
    }

    #[test]
    fn test_event_serializes_tagged() {
        let json = serde_json::to_string(&GameEvent::GameOver { final_score: 7 }).unwrap();
        assert_eq!(json, r#"{"type":"game_over","final_score":7}"#);
    }
}
