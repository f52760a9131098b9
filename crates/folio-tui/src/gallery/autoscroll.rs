use super::controller::ScrollController;
use super::scheduler::{FrameTask, TaskState};

/// Conditions that pause auto-scrolling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Suspension {
    pub hovering: bool,
    pub lightbox_open: bool,
    pub dragging: bool,
    pub coasting: bool,
    pub page_animating: bool,
}

impl Suspension {
    pub fn any(&self) -> bool {
        self.hovering || self.lightbox_open || self.dragging || self.coasting || self.page_animating
    }
}

/// Constant-speed drift of the gallery offset, one step per frame
#[derive(Debug, Clone)]
pub struct AutoScrollDriver {
    /// Pixels per frame
    speed: f64,
    /// Suspended while any [`Suspension`] holds
    task: FrameTask,
}

impl AutoScrollDriver {
    pub fn new(speed: f64) -> Self {
        Self {
            speed,
            task: FrameTask::scheduled("auto-scroll"),
        }
    }

    pub fn state(&self) -> TaskState {
        self.task.state()
    }

    pub fn update(&mut self, suspension: Suspension) {
        self.task.set_suspended(suspension.any());
    }

    /// Advance one frame. Returns true when the offset moved.
    pub fn tick(&mut self, controller: &mut ScrollController) -> bool {
        if !self.task.is_scheduled() || !controller.is_initialized() {
            return false;
        }
        controller.advance(self.speed);
        true
    }

    pub fn cancel(&mut self) {
        self.task.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::controller::ViewportMetrics;
    use folio_core::GalleryConfig;

    fn controller() -> ScrollController {
        let mut c = ScrollController::new(&GalleryConfig::default());
        c.set_metrics(ViewportMetrics {
            total_width: 3000.0,
            visible_width: 800.0,
        });
        c
    }

    #[test]
    fn test_waits_for_initialization() {
        let mut c = controller();
        let mut driver = AutoScrollDriver::new(0.3);
        assert!(!driver.tick(&mut c));
        assert_eq!(c.offset(), 0.0);

        c.initialize();
        let start = c.offset();
        assert!(driver.tick(&mut c));
        assert!((c.offset() - start - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_each_suspension_reason_pauses() {
        let reasons = [
            Suspension { hovering: true, ..Default::default() },
            Suspension { lightbox_open: true, ..Default::default() },
            Suspension { dragging: true, ..Default::default() },
            Suspension { coasting: true, ..Default::default() },
            Suspension { page_animating: true, ..Default::default() },
        ];
        for reason in reasons {
            let mut c = controller();
            c.initialize();
            let start = c.offset();
            let mut driver = AutoScrollDriver::new(0.3);

            driver.update(reason);
            assert_eq!(driver.state(), TaskState::Suspended);
            for _ in 0..10 {
                assert!(!driver.tick(&mut c));
            }
            assert_eq!(c.offset(), start, "{reason:?}");

            // Resumes from where it stopped
            driver.update(Suspension::default());
            assert!(driver.tick(&mut c));
            assert!((c.offset() - start - 0.3).abs() < 1e-9);
        }
    }

    #[test]
    fn test_wrap_continuity() {
        let mut c = controller();
        c.initialize();
        let lap = 1000.0;
        let mut driver = AutoScrollDriver::new(0.3);
        let mut previous = c.offset();
        let mut wraps = 0;
        for _ in 0..10_000 {
            driver.tick(&mut c);
            let step = c.offset() - previous;
            assert!(step.abs() <= lap + 0.3 + 1e-9);
            if step < 0.0 {
                wraps += 1;
                assert!(((step + lap) - 0.3).abs() < 1e-6);
            }
            assert!(c.offset() >= 100.0 && c.offset() < 2000.0);
            previous = c.offset();
        }
        assert!(wraps >= 1);
    }

    #[test]
    fn test_cancelled_driver_stays_stopped() {
        let mut c = controller();
        c.initialize();
        let mut driver = AutoScrollDriver::new(0.3);
        driver.cancel();
        driver.update(Suspension::default());
        assert_eq!(driver.state(), TaskState::Cancelled);
        assert!(!driver.tick(&mut c));
    }
}
