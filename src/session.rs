// src/session.rs
// Ties the retry queue to scoring for one quiz session.

use log::{debug, info};

use crate::deck::Item;
use crate::error::SchedulerError;
use crate::scheduler::{RetryQueue, Scheduler};

/// Session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Segment shown as the question. Negative picks a random segment each turn.
    pub display_segment: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { display_segment: 0 }
    }
}

/// One quiz session.
///
/// Callers drive it turn by turn: `advance`, any number of question/answer
/// reads, then one `check`.
pub struct Session<'a> {
    scheduler: Box<dyn Scheduler + 'a>,
    config: SessionConfig,
    current_item: Option<Item>,
    total_items: usize,
    correct: usize,
}

impl<'a> Session<'a> {
    /// Creates a session over `items` with a randomly ordered retry queue.
    pub fn new(items: Vec<Item>, config: SessionConfig) -> Result<Self, SchedulerError> {
        Ok(Session::with_scheduler(Box::new(RetryQueue::new(items)?), config))
    }

    /// Creates a session around an existing scheduler.
    pub fn with_scheduler(scheduler: Box<dyn Scheduler + 'a>, config: SessionConfig) -> Self {
        let total_items = scheduler.universe_size();
        info!("Starting session with {} items.", total_items);
        Session {
            scheduler,
            config,
            current_item: None,
            total_items,
            correct: 0,
        }
    }

    /// Moves on to the next item from the scheduler.
    pub fn advance(&mut self) {
        self.current_item = Some(self.scheduler.dequeue().clone());
    }

    /// The given segment of the current item.
    ///
    /// # Panics
    ///
    /// Panics if called before the first `advance`.
    pub fn current_question(&self, segment: i32) -> String {
        self.current().display_segment(segment)
    }

    /// The question for the configured display segment.
    pub fn question(&self) -> String {
        self.current_question(self.config.display_segment)
    }

    /// The whole current item, one segment per line.
    ///
    /// # Panics
    ///
    /// Panics if called before the first `advance`.
    pub fn current_answer(&self) -> String {
        self.current().display_full()
    }

    /// Grades `candidate` against the current item.
    ///
    /// A miss sends the item back into the queue; a hit counts towards the score.
    ///
    /// # Panics
    ///
    /// Panics if called before the first `advance`.
    pub fn check(&mut self, candidate: &str) -> bool {
        let is_correct = self.current().matches(candidate);
        if is_correct {
            self.correct += 1;
        } else {
            // Bring it back a few items from now.
            self.scheduler.recycle();
        }
        debug!("Checked {:?}: {}", candidate, if is_correct { "correct" } else { "incorrect" });
        is_correct
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn correct_count(&self) -> usize {
        self.correct
    }

    /// Correct answers as a whole percentage of the item count.
    pub fn percent_correct(&self) -> usize {
        percent(self.correct, self.total_items)
    }

    /// Stats line in the form `"3/10     30%"`.
    pub fn stats_line(&self) -> String {
        format!("{}/{}     {}%", self.correct, self.total_items, self.percent_correct())
    }

    fn current(&self) -> &Item {
        match &self.current_item {
            Some(item) => item,
            None => panic!("no current item: Session::advance must be called first"),
        }
    }
}

/// `floor(correct / total * 100)`, or 0 when there is nothing to score against.
pub fn percent(correct: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    correct * 100 / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::loader::placeholder_item;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create_test_items(num_items: usize) -> Vec<Item> {
        (0..num_items)
            .map(|i| {
                let front = format!("Front {}", i);
                let back = format!("Back {}", i);
                Item::from_strs(&[&[front.as_str()], &[back.as_str()]]).unwrap()
            })
            .collect()
    }

    fn create_session(num_items: usize) -> Session<'static> {
        let items = create_test_items(num_items);
        let queue = RetryQueue::with_rng(items, StdRng::seed_from_u64(3)).unwrap();
        Session::with_scheduler(Box::new(queue), SessionConfig::default())
    }

    fn back_of(question: &str) -> String {
        question.replace("Front", "Back")
    }

    #[test]
    fn test_empty_items_rejected() {
        assert!(matches!(
            Session::new(Vec::new(), SessionConfig::default()),
            Err(SchedulerError::EmptyUniverse)
        ));
    }

    #[test]
    fn test_score_arithmetic() {
        let mut session = create_session(4);
        assert_eq!(session.total_items(), 4);

        session.advance();
        let answer = back_of(&session.question());
        assert!(session.check(&answer));

        session.advance();
        assert!(!session.check("nope"));

        session.advance();
        let answer = back_of(&session.question());
        assert!(session.check(&answer));

        assert_eq!(session.correct_count(), 2);
        assert_eq!(session.percent_correct(), 50);
        assert_eq!(session.stats_line(), "2/4     50%");
    }

    #[test]
    fn test_percent_floors_and_guards_zero() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(5, 0), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 66);
        // Retries can push the score past 100.
        assert_eq!(percent(6, 4), 150);
    }

    #[test]
    fn test_placeholder_session() {
        let session = Session::new(vec![placeholder_item()], SessionConfig::default()).unwrap();
        assert_eq!(session.total_items(), 1);
        assert_eq!(session.percent_correct(), 0);
    }

    #[test]
    fn test_question_and_answer_follow_current_item() {
        let mut session = create_session(3);
        session.advance();
        let question = session.current_question(0);
        assert!(question.starts_with("Front "));
        assert_eq!(session.current_question(1), back_of(&question));
        assert_eq!(session.current_question(9), question);
        assert_eq!(session.current_answer(), format!("{}\n{}", question, back_of(&question)));
    }

    #[test]
    fn test_configured_segment() {
        let queue = RetryQueue::with_rng(create_test_items(3), StdRng::seed_from_u64(8)).unwrap();
        let config = SessionConfig { display_segment: 1 };
        let mut session = Session::with_scheduler(Box::new(queue), config);
        session.advance();
        assert!(session.question().starts_with("Back "));
    }

    #[test]
    fn test_miss_requeues_current_item() {
        let mut session = create_session(10);
        session.advance();
        let missed = session.current_answer();
        assert!(!session.check("wrong"));

        let mut seen = 0;
        for _ in 0..10 {
            session.advance();
            if session.current_answer() == missed {
                seen += 1;
            }
        }
        assert_eq!(seen, 1);
        assert_eq!(session.correct_count(), 0);
    }

    #[test]
    fn test_missed_item_waits_three_turns() {
        let mut session = create_session(10);
        session.advance();
        let missed = session.current_answer();
        session.check("wrong");

        for _ in 0..3 {
            session.advance();
            assert_ne!(session.current_answer(), missed);
        }
        session.advance();
        assert_eq!(session.current_answer(), missed);
    }

    #[test]
    #[should_panic(expected = "advance must be called first")]
    fn test_question_before_advance_panics() {
        let session = create_session(2);
        session.current_question(0);
    }

    #[test]
    #[should_panic(expected = "advance must be called first")]
    fn test_answer_before_advance_panics() {
        let session = create_session(2);
        session.current_answer();
    }

    #[test]
    #[should_panic(expected = "advance must be called first")]
    fn test_check_before_advance_panics() {
        let mut session = create_session(2);
        session.check("anything");
    }
}
