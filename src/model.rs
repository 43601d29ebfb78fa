//! Order-N Markov chains over arbitrary symbol sequences
//!
//! The generator trains two independent chains, one over pitches and one over
//! duration types, and samples them separately.

use rand::Rng;
use std::collections::BTreeMap;
use std::fmt;

/// Upper bound on a single generated walk; a chain trained on cyclic input
/// may never reach a terminal state.
const MAX_WALK: usize = 10_000;

/// An order-N Markov chain: a window of the last N symbols determines the
/// weighted distribution of the next one.
#[derive(Debug, Clone)]
pub struct MarkovChain<T> {
    order: usize,
    /// The first window of the first training sequence; generation starts here.
    start: Option<Vec<T>>,
    transitions: BTreeMap<Vec<T>, BTreeMap<T, u32>>,
}

impl<T: Clone + Ord> MarkovChain<T> {
    pub fn new(order: usize) -> Self {
        Self {
            order: order.max(1),
            start: None,
            transitions: BTreeMap::new(),
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// True when no transitions have been recorded (training sequences were
    /// absent or shorter than `order + 1`).
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Record the transitions of one training sequence. May be called
    /// repeatedly to train on several sequences.
    pub fn train(&mut self, sequence: &[T]) {
        if sequence.len() <= self.order {
            return;
        }
        if self.start.is_none() {
            self.start = Some(sequence[..self.order].to_vec());
        }
        for window in sequence.windows(self.order + 1) {
            let state = window[..self.order].to_vec();
            let next = window[self.order].clone();
            *self
                .transitions
                .entry(state)
                .or_default()
                .entry(next)
                .or_insert(0) += 1;
        }
    }

    fn sample<R: Rng>(&self, state: &[T], rng: &mut R) -> Option<T> {
        let successors = self.transitions.get(state)?;
        let total: u32 = successors.values().sum();
        let mut roll = rng.random_range(0..total);
        for (symbol, count) in successors {
            if roll < *count {
                return Some(symbol.clone());
            }
            roll -= count;
        }
        None
    }

    /// Walk from the initial training window until a state with no recorded
    /// successor is reached (or the walk cap, for cyclic chains).
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<T> {
        let Some(start) = &self.start else {
            return Vec::new();
        };
        let mut output = start.clone();
        while output.len() < MAX_WALK {
            let state = &output[output.len() - self.order..];
            match self.sample(state, rng) {
                Some(next) => output.push(next),
                None => break,
            }
        }
        output
    }

    /// Generate exactly `len` symbols, restarting the walk whenever it dies
    /// out and truncating the tail.
    pub fn generate_exact<R: Rng>(&self, len: usize, rng: &mut R) -> Vec<T> {
        let mut output = Vec::with_capacity(len);
        while output.len() < len {
            let run = self.generate(rng);
            if run.is_empty() {
                break;
            }
            output.extend(run);
        }
        output.truncate(len);
        output
    }
}

impl<T: Clone + Ord + fmt::Display> fmt::Display for MarkovChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (state, successors) in &self.transitions {
            let window: Vec<String> = state.iter().map(T::to_string).collect();
            write!(f, "[{}] ->", window.join(", "))?;
            for (symbol, count) in successors {
                write!(f, " {symbol}({count})")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
