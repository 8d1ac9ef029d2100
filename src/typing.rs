use std::rc::Rc;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypingError {
    #[error("at least one text is required")]
    EmptyTexts,

    #[error("typing speed must be positive and divisible into a deleting interval")]
    ZeroTypingSpeed,

    #[error("pause delay must be positive")]
    ZeroPauseDelay,
}

/// What a timer-driven driver does next with its running animator.
#[derive(Clone, Debug, PartialEq)]
pub enum TypingStep {
    /// Wait `delay`, then show `next`.
    Schedule { delay: Duration, next: TypingAnimator },
    /// Inputs changed: drop the pending timer and start over with this animator.
    Restart(TypingAnimator),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingPhase {
    Typing,
    Pausing,
    Deleting,
}

/// Types each text one character at a time, pauses, deletes it twice as fast,
/// then moves on to the next text, wrapping forever.
///
/// The animator never sleeps on its own. A driver asks for
/// [`pending_delay`](Self::pending_delay), waits that long and calls
/// [`advance`](Self::advance), or feeds virtual time through
/// [`tick`](Self::tick).
#[derive(Clone, Debug, PartialEq)]
pub struct TypingAnimator {
    texts: Rc<[String]>,
    typing_speed: Duration,
    pause_delay: Duration,
    text_index: usize,
    char_index: usize,
    deleting: bool,
    completed: u64,
    carried: Duration,
}

impl TypingAnimator {
    pub fn new<I, S>(texts: I, typing_speed: Duration, pause_delay: Duration) -> Result<Self, TypingError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let texts: Rc<[String]> = texts.into_iter().map(Into::<String>::into).collect();

        if texts.is_empty() {
            return Err(TypingError::EmptyTexts);
        }
        if (typing_speed / 2).is_zero() {
            return Err(TypingError::ZeroTypingSpeed);
        }
        if pause_delay.is_zero() {
            return Err(TypingError::ZeroPauseDelay);
        }

        Ok(Self {
            texts,
            typing_speed,
            pause_delay,
            text_index: 0,
            char_index: 0,
            deleting: false,
            completed: 0,
            carried: Duration::ZERO,
        })
    }

    /// Whether `other` was built from the same texts and timings, regardless
    /// of how far either has progressed.
    pub fn same_inputs(&self, other: &Self) -> bool {
        self.texts == other.texts
            && self.typing_speed == other.typing_speed
            && self.pause_delay == other.pause_delay
    }

    /// Decides the single timer a driver keeps outstanding for `self`, given
    /// the animator it was last handed.
    pub fn next_step(&self, source: &Self) -> TypingStep {
        if !self.same_inputs(source) {
            let mut restarted = source.clone();
            restarted.reset();
            return TypingStep::Restart(restarted);
        }

        let delay = self.pending_delay();
        let mut next = self.clone();
        next.carried = Duration::ZERO;
        next.tick(delay);
        TypingStep::Schedule { delay, next }
    }

    pub fn current_text(&self) -> &str {
        &self.texts[self.text_index]
    }

    pub fn displayed(&self) -> &str {
        let text = self.current_text();
        match text.char_indices().nth(self.char_index) {
            Some((end, _)) => &text[..end],
            None => text,
        }
    }

    pub fn phase(&self) -> TypingPhase {
        if self.deleting {
            TypingPhase::Deleting
        } else if self.char_index < self.current_len() {
            TypingPhase::Typing
        } else {
            TypingPhase::Pausing
        }
    }

    pub fn typing_interval(&self) -> Duration {
        self.typing_speed
    }

    pub fn deleting_interval(&self) -> Duration {
        self.typing_speed / 2
    }

    /// Delay before the single outstanding transition fires.
    pub fn pending_delay(&self) -> Duration {
        match self.phase() {
            TypingPhase::Typing => self.typing_interval(),
            TypingPhase::Pausing => self.pause_delay,
            TypingPhase::Deleting => self.deleting_interval(),
        }
    }

    /// Applies the pending transition and returns the phase that follows it.
    pub fn advance(&mut self) -> TypingPhase {
        self.carried = Duration::ZERO;
        self.step();
        self.phase()
    }

    /// Feeds `elapsed` virtual time and applies every transition that falls
    /// due. Leftover time carries into the next call. Whole rounds through
    /// every text are skipped arithmetically.
    pub fn tick(&mut self, elapsed: Duration) -> usize {
        let mut carried = self.carried.saturating_add(elapsed);
        let mut applied = self.skip_rounds(&mut carried);

        loop {
            let due = self.pending_delay();
            if carried < due {
                self.carried = carried;
                return applied;
            }
            carried -= due;
            self.advance();
            applied = applied.saturating_add(1);
        }
    }

    pub fn reset(&mut self) {
        self.text_index = 0;
        self.char_index = 0;
        self.deleting = false;
        self.completed = 0;
        self.carried = Duration::ZERO;
    }

    fn step(&mut self) {
        match self.phase() {
            TypingPhase::Typing => self.char_index += 1,
            TypingPhase::Pausing => {
                self.deleting = true;
                if self.char_index == 0 {
                    self.next_text();
                }
            }
            TypingPhase::Deleting => {
                self.char_index = self.char_index.saturating_sub(1);
                if self.char_index == 0 {
                    self.next_text();
                }
            }
        }
    }

    /// Drops every complete round contained in `carried`. A round returns
    /// the animator to the state it started in.
    fn skip_rounds(&mut self, carried: &mut Duration) -> usize {
        let Some((round, steps)) = self.round() else {
            return 0;
        };
        let round_nanos = round.as_nanos();
        let rounds = carried.as_nanos() / round_nanos;
        if rounds == 0 {
            return 0;
        }

        let rest = carried.as_nanos() % round_nanos;
        *carried = Duration::new(
            (rest / 1_000_000_000) as u64,
            (rest % 1_000_000_000) as u32,
        );

        let texts = self.texts.len() as u128;
        self.completed = u64::try_from(u128::from(self.completed) + rounds * texts).unwrap_or(u64::MAX);
        usize::try_from(rounds * steps as u128).unwrap_or(usize::MAX)
    }

    /// Duration and transition count of one pass through every text, or
    /// `None` if the duration does not fit in a `Duration`.
    fn round(&self) -> Option<(Duration, usize)> {
        let mut total = Duration::ZERO;
        let mut steps = 0usize;

        for text in self.texts.iter() {
            let len = u32::try_from(text.chars().count()).ok()?;
            total = total
                .checked_add(self.typing_interval().checked_mul(len)?)?
                .checked_add(self.pause_delay)?
                .checked_add(self.deleting_interval().checked_mul(len)?)?;
            steps = steps.checked_add(2 * len as usize + 1)?;
        }

        Some((total, steps))
    }

    fn next_text(&mut self) {
        self.deleting = false;
        self.text_index = (self.text_index + 1) % self.texts.len();
        self.completed += 1;
    }

    fn current_len(&self) -> usize {
        self.current_text().chars().count()
    }
}

#[cfg(test)]
impl TypingAnimator {
    pub fn text_index(&self) -> usize {
        self.text_index
    }

    pub fn char_count(&self) -> usize {
        self.char_index
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Number of times the animator has moved on to the next text.
    pub fn completed(&self) -> u64 {
        self.completed
    }
}
