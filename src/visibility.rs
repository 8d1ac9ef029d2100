pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// One report from the viewport about a watched region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionSample {
    pub ratio: f64,
    pub intersecting: bool,
}

impl IntersectionSample {
    pub fn new(ratio: f64, intersecting: bool) -> Self {
        Self {
            ratio,
            intersecting,
        }
    }
}

/// Whether a region is currently on screen. Follows every enter and exit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityTracker {
    threshold: f64,
    visible: bool,
}

impl VisibilityTracker {
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_finite() {
            threshold.clamp(0.0, 1.0)
        } else {
            DEFAULT_THRESHOLD
        };

        Self {
            threshold,
            visible: false,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns `true` when the sample flipped visibility.
    pub fn update(&mut self, sample: IntersectionSample) -> bool {
        let visible = sample.intersecting && sample.ratio >= self.threshold;
        let changed = visible != self.visible;
        self.visible = visible;
        changed
    }
}

/// Platform hook that reports intersection changes for a target.
///
/// Dropping the returned subscription must stop observation. `None` means
/// the target could not be observed and its visibility stays `false`.
pub trait IntersectionSource {
    type Target: ?Sized;
    type Subscription;

    fn observe(
        &self,
        target: &Self::Target,
        threshold: f64,
        on_change: Box<dyn FnMut(IntersectionSample)>,
    ) -> Option<Self::Subscription>;
}

/// Feeds `source` reports for `target` through a fresh tracker and calls
/// `on_visibility` only when the visible flag changes.
pub fn watch<S, F>(source: &S, target: &S::Target, threshold: f64, mut on_visibility: F) -> Option<S::Subscription>
where
    S: IntersectionSource,
    F: FnMut(bool) + 'static,
{
    let mut tracker = VisibilityTracker::new(threshold);
    let threshold = tracker.threshold();

    source.observe(
        target,
        threshold,
        Box::new(move |sample| {
            if tracker.update(sample) {
                on_visibility(tracker.is_visible());
            }
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Listener = Box<dyn FnMut(IntersectionSample)>;

    #[derive(Default)]
    struct FakeViewport {
        listeners: Rc<RefCell<Vec<Option<Listener>>>>,
        thresholds: RefCell<Vec<f64>>,
    }

    struct FakeSubscription {
        listeners: Rc<RefCell<Vec<Option<Listener>>>>,
        slot: usize,
    }

    impl Drop for FakeSubscription {
        fn drop(&mut self) {
            self.listeners.borrow_mut()[self.slot] = None;
        }
    }

    impl IntersectionSource for FakeViewport {
        type Target = str;
        type Subscription = FakeSubscription;

        fn observe(
            &self,
            target: &str,
            threshold: f64,
            on_change: Listener,
        ) -> Option<FakeSubscription> {
            if target.is_empty() {
                return None;
            }

            self.thresholds.borrow_mut().push(threshold);
            let mut listeners = self.listeners.borrow_mut();
            listeners.push(Some(on_change));
            Some(FakeSubscription {
                listeners: Rc::clone(&self.listeners),
                slot: listeners.len() - 1,
            })
        }
    }

    impl FakeViewport {
        fn report(&self, ratio: f64, intersecting: bool) {
            for listener in self.listeners.borrow_mut().iter_mut().flatten() {
                listener(IntersectionSample::new(ratio, intersecting));
            }
        }

        fn active(&self) -> usize {
            self.listeners.borrow().iter().flatten().count()
        }
    }

    fn recorder() -> (Rc<RefCell<Vec<bool>>>, impl FnMut(bool) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |visible| sink.borrow_mut().push(visible))
    }

    #[test]
    fn visibility_retriggers_on_every_enter_and_exit() {
        let mut tracker = VisibilityTracker::new(0.1);

        assert!(tracker.update(IntersectionSample::new(0.5, true)));
        assert!(tracker.is_visible());
        assert!(tracker.update(IntersectionSample::new(0.0, false)));
        assert!(!tracker.is_visible());
        assert!(tracker.update(IntersectionSample::new(0.2, true)));
        assert!(tracker.is_visible());
    }

    #[test]
    fn ratio_below_threshold_is_not_visible() {
        let mut tracker = VisibilityTracker::new(0.1);

        assert!(!tracker.update(IntersectionSample::new(0.05, true)));
        assert!(!tracker.is_visible());
        assert!(tracker.update(IntersectionSample::new(0.1, true)));
    }

    #[test]
    fn zero_threshold_needs_an_actual_intersection() {
        let mut tracker = VisibilityTracker::new(0.0);

        assert!(!tracker.update(IntersectionSample::new(0.0, false)));
        assert!(tracker.update(IntersectionSample::new(0.0, true)));
    }

    #[test]
    fn threshold_is_clamped_to_a_fraction() {
        assert_eq!(VisibilityTracker::new(3.0).threshold(), 1.0);
        assert_eq!(VisibilityTracker::new(-1.0).threshold(), 0.0);
        assert_eq!(VisibilityTracker::new(f64::NAN).threshold(), DEFAULT_THRESHOLD);
    }

    #[test]
    fn watch_forwards_only_changes() {
        let viewport = FakeViewport::default();
        let (seen, sink) = recorder();

        let _subscription = watch(&viewport, "skills", 0.1, sink).expect("target attached");
        viewport.report(0.3, true);
        viewport.report(0.6, true);
        viewport.report(0.0, false);
        viewport.report(0.0, false);
        viewport.report(0.15, true);

        assert_eq!(*seen.borrow(), vec![true, false, true]);
        assert_eq!(*viewport.thresholds.borrow(), vec![0.1]);
    }

    #[test]
    fn dropping_the_subscription_stops_updates() {
        let viewport = FakeViewport::default();
        let (seen, sink) = recorder();

        let subscription = watch(&viewport, "about", 0.1, sink).expect("target attached");
        viewport.report(1.0, true);
        drop(subscription);
        viewport.report(0.0, false);

        assert_eq!(viewport.active(), 0);
        assert_eq!(*seen.borrow(), vec![true]);
    }

    #[test]
    fn unattached_target_never_becomes_visible() {
        let viewport = FakeViewport::default();
        let (seen, sink) = recorder();

        assert!(watch(&viewport, "", 0.1, sink).is_none());
        viewport.report(1.0, true);

        assert!(seen.borrow().is_empty());
    }
}
