//! Pointer drag with momentum.
//!
//! Idle → Dragging on pointer-down; Dragging → Idle or Coasting on
//! pointer-up/leave depending on the release velocity; Coasting decays each
//! frame until the velocity drops below the threshold or a new pointer-down
//! cancels it.

use folio_core::GalleryConfig;
use tracing::debug;

use super::controller::ScrollController;
use super::scheduler::FrameTask;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// Pointer x at pointer-down
    pub anchor_x: f64,
    /// Offset the drag is measured from; moves with each wrap shift
    pub anchor_offset: f64,
    /// Pointer x at the previous move
    pub last_x: f64,
    /// Pointer travel between the last two moves, positive leftwards
    pub velocity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionPhase {
    Idle,
    Dragging(DragState),
    Coasting { velocity: f64 },
}

#[derive(Debug, Clone)]
pub struct InteractionEngine {
    phase: InteractionPhase,
    /// Set once a press travels past `click_threshold`, cleared on pointer-down
    has_moved: bool,
    /// Frame task that runs while coasting
    momentum: FrameTask,
    /// Content pixels per pointer pixel while dragging
    drag_multiplier: f64,
    /// Pointer travel (px) that turns a press into a drag
    click_threshold: f64,
    /// Speed (px/frame) below which momentum stops
    momentum_threshold: f64,
    /// Per-frame velocity factor while coasting
    momentum_decay: f64,
}

impl InteractionEngine {
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            phase: InteractionPhase::Idle,
            has_moved: false,
            momentum: FrameTask::suspended("momentum"),
            drag_multiplier: config.drag_multiplier,
            click_threshold: config.click_threshold,
            momentum_threshold: config.momentum_threshold,
            momentum_decay: config.momentum_decay,
        }
    }

    pub fn phase(&self) -> InteractionPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, InteractionPhase::Dragging(_))
    }

    pub fn is_coasting(&self) -> bool {
        matches!(self.phase, InteractionPhase::Coasting { .. })
    }

    /// The last press travelled past the click threshold; clicks are
    /// suppressed until the next pointer-down
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub fn pointer_down(&mut self, x: f64, controller: &mut ScrollController) {
        if self.is_coasting() {
            debug!("Momentum cancelled by pointer-down");
        }
        if self.momentum.is_scheduled() {
            self.momentum.set_suspended(true);
        }
        controller.cancel_animation();

        self.has_moved = false;
        self.phase = InteractionPhase::Dragging(DragState {
            anchor_x: x,
            anchor_offset: controller.offset(),
            last_x: x,
            velocity: 0.0,
        });
    }

    /// Returns false when no drag is in progress
    pub fn pointer_move(&mut self, x: f64, controller: &mut ScrollController) -> bool {
        let InteractionPhase::Dragging(ref mut drag) = self.phase else {
            return false;
        };

        let walk = (x - drag.anchor_x) * self.drag_multiplier;
        drag.velocity = drag.last_x - x;
        drag.last_x = x;

        if (x - drag.anchor_x).abs() > self.click_threshold {
            self.has_moved = true;
        }

        let target = drag.anchor_offset - walk;
        let shift = controller.wrap_shift(target);
        drag.anchor_offset += shift;
        controller.set_offset(target + shift);
        true
    }

    /// End a drag. Returns true when momentum starts.
    pub fn pointer_up(&mut self) -> bool {
        let InteractionPhase::Dragging(drag) = self.phase else {
            return false;
        };

        if drag.velocity.abs() < self.momentum_threshold || self.momentum.is_cancelled() {
            self.phase = InteractionPhase::Idle;
            return false;
        }

        debug!("Coasting at {:.2}px/frame", drag.velocity);
        self.phase = InteractionPhase::Coasting {
            velocity: drag.velocity,
        };
        self.momentum.set_suspended(false);
        true
    }

    /// Leaving the viewport while dragging releases the drag
    pub fn pointer_leave(&mut self) -> bool {
        self.pointer_up()
    }

    /// One momentum frame. Returns true while coasting continues.
    pub fn tick(&mut self, controller: &mut ScrollController) -> bool {
        let InteractionPhase::Coasting { velocity } = self.phase else {
            return false;
        };
        if !self.momentum.is_scheduled() {
            return false;
        }

        if velocity.abs() < self.momentum_threshold {
            debug!("Momentum settled");
            self.phase = InteractionPhase::Idle;
            self.momentum.set_suspended(true);
            return false;
        }

        controller.advance(velocity);
        self.phase = InteractionPhase::Coasting {
            velocity: velocity * self.momentum_decay,
        };
        true
    }

    /// Stop everything for good
    pub fn cancel(&mut self) {
        self.phase = InteractionPhase::Idle;
        self.momentum.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::controller::ViewportMetrics;

    fn setup() -> (InteractionEngine, ScrollController) {
        let config = GalleryConfig::default();
        let mut controller = ScrollController::new(&config);
        controller.set_metrics(ViewportMetrics {
            total_width: 3000.0,
            visible_width: 800.0,
        });
        controller.set_offset(1200.0);
        (InteractionEngine::new(&config), controller)
    }

    #[test]
    fn test_drag_moves_twice_the_pointer() {
        let (mut engine, mut c) = setup();
        engine.pointer_down(400.0, &mut c);
        assert!(engine.pointer_move(350.0, &mut c));
        assert_eq!(c.offset(), 1300.0);
        assert!(engine.has_moved());
    }

    #[test]
    fn test_small_drag_is_a_click() {
        let (mut engine, mut c) = setup();
        engine.pointer_down(400.0, &mut c);
        engine.pointer_move(403.0, &mut c);
        engine.pointer_move(403.1, &mut c);
        assert!(!engine.has_moved());
        assert!(!engine.pointer_up());
        assert_eq!(engine.phase(), InteractionPhase::Idle);
    }

    #[test]
    fn test_jittery_click_coasts_without_moving() {
        let (mut engine, mut c) = setup();
        engine.pointer_down(400.0, &mut c);
        engine.pointer_move(397.0, &mut c);
        engine.pointer_move(405.0, &mut c);
        // Release velocity is the last frame delta, independent of travel
        assert!(engine.pointer_up());
        assert!(engine.is_coasting());
        assert!(!engine.has_moved());
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let (mut engine, mut c) = setup();
        assert!(!engine.pointer_move(100.0, &mut c));
        assert_eq!(c.offset(), 1200.0);
    }

    #[test]
    fn test_drag_wrap_shifts_anchor() {
        let (mut engine, mut c) = setup();
        engine.pointer_down(800.0, &mut c);
        // walk = -800 -> target 2000 wraps to 1000
        engine.pointer_move(400.0, &mut c);
        assert_eq!(c.offset(), 1000.0);
        let InteractionPhase::Dragging(drag) = engine.phase() else {
            panic!("expected dragging");
        };
        assert_eq!(drag.anchor_offset, 200.0);

        // Continuing the same gesture stays continuous
        engine.pointer_move(390.0, &mut c);
        assert_eq!(c.offset(), 1020.0);
    }

    #[test]
    fn test_release_with_velocity_coasts_and_decays() {
        let (mut engine, mut c) = setup();
        engine.pointer_down(400.0, &mut c);
        engine.pointer_move(380.0, &mut c);
        engine.pointer_move(370.0, &mut c);
        let before = c.offset();
        assert!(engine.pointer_up());
        assert!(engine.is_coasting());

        assert!(engine.tick(&mut c));
        assert!((c.offset() - (before + 10.0)).abs() < 1e-9);
        let InteractionPhase::Coasting { velocity } = engine.phase() else {
            panic!("expected coasting");
        };
        assert!((velocity - 9.6).abs() < 1e-9);

        let mut frames = 0;
        while engine.tick(&mut c) {
            frames += 1;
            assert!(frames < 1_000);
        }
        assert_eq!(engine.phase(), InteractionPhase::Idle);
    }

    #[test]
    fn test_pointer_down_cancels_coasting() {
        let (mut engine, mut c) = setup();
        engine.pointer_down(400.0, &mut c);
        engine.pointer_move(370.0, &mut c);
        engine.pointer_up();
        assert!(engine.is_coasting());

        engine.pointer_down(300.0, &mut c);
        assert!(engine.is_dragging());
        let offset = c.offset();
        assert!(!engine.tick(&mut c));
        assert_eq!(c.offset(), offset);
    }

    #[test]
    fn test_cancelled_engine_never_coasts() {
        let (mut engine, mut c) = setup();
        engine.cancel();
        engine.pointer_down(400.0, &mut c);
        engine.pointer_move(370.0, &mut c);
        assert!(!engine.pointer_up());
        assert!(!engine.tick(&mut c));
    }
}
