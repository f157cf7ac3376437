use log::debug;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::eval::ActionEvaluation;
use crate::game::{Decision, GameState};
use crate::util::{argmax, maximal_indices};

/// How to choose between equally scored actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieBreak {
    /// The first action in enumeration order.
    #[default]
    First,
    /// Uniformly among the best, drawn from a generator with this seed.
    Seeded(u64),
}

/// Chooses the action with the best immediate evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReflexAgent {
    #[serde(default)]
    pub tie_break: TieBreak,
    #[serde(skip)]
    rng: Option<SmallRng>,
}

impl ReflexAgent {
    pub fn new(tie_break: TieBreak) -> ReflexAgent {
        ReflexAgent {
            tie_break,
            rng: None,
        }
    }

    /// Best legal action of agent 0, `None` if there is none.
    pub fn action<G, E>(&mut self, state: &G, eval: &E) -> Option<G::Action>
    where
        G: GameState,
        E: ActionEvaluation<G> + ?Sized,
    {
        self.decide(state, eval).action
    }

    /// Like [`ReflexAgent::action`] with the score of the chosen action and the
    /// number of scored actions.
    pub fn decide<G, E>(&mut self, state: &G, eval: &E) -> Decision<G::Action>
    where
        G: GameState,
        E: ActionEvaluation<G> + ?Sized,
    {
        let actions = state.legal_actions(0);
        let scores: Vec<f64> = actions
            .iter()
            .map(|action| eval.eval_action(state, action))
            .collect();

        match self.select(&scores) {
            Some(index) => {
                debug!("reflex {:?} -> {:?}", scores, actions[index]);
                Decision {
                    value: scores[index],
                    nodes: scores.len(),
                    action: actions.into_iter().nth(index),
                }
            }
            None => Decision {
                action: None,
                value: f64::NEG_INFINITY,
                nodes: 0,
            },
        }
    }

    fn select(&mut self, scores: &[f64]) -> Option<usize> {
        match self.tie_break {
            TieBreak::First => argmax(scores.iter()),
            TieBreak::Seeded(seed) => {
                let rng = self.rng.get_or_insert_with(|| SmallRng::seed_from_u64(seed));
                maximal_indices(scores).choose(rng).copied()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::eval::{Lookahead, ScoreEvaluation};
    use crate::game::testing::{leaf, node, TreeGame};

    #[test]
    fn best_immediate() {
        let game = TreeGame::new(node(vec![leaf(1.0), leaf(7.0), leaf(3.0)]), 2);
        let mut agent = ReflexAgent::default();
        assert_eq!(agent.action(&game, &Lookahead(&ScoreEvaluation)), Some(1));
    }

    #[test]
    fn no_actions() {
        let game = TreeGame::new(leaf(1.0), 1);
        let mut agent = ReflexAgent::default();
        assert_eq!(agent.action(&game, &Lookahead(&ScoreEvaluation)), None);
    }

    #[test]
    fn tie_break() {
        let game = TreeGame::new(
            node(vec![leaf(5.0), leaf(1.0), leaf(5.0), leaf(5.0)]),
            1,
        );
        let eval = Lookahead(&ScoreEvaluation);

        let mut first = ReflexAgent::new(TieBreak::First);
        for _ in 0..10 {
            assert_eq!(first.action(&game, &eval), Some(0));
        }

        // Reproducible and never picks a worse action
        let mut a = ReflexAgent::new(TieBreak::Seeded(3));
        let mut b = ReflexAgent::new(TieBreak::Seeded(3));
        let picks: Vec<_> = (0..50).map(|_| a.action(&game, &eval).unwrap()).collect();
        let again: Vec<_> = (0..50).map(|_| b.action(&game, &eval).unwrap()).collect();
        assert_eq!(picks, again);
        assert!(picks.iter().all(|&p| p != 1));
        assert!(picks.contains(&0) && picks.contains(&2) && picks.contains(&3));
    }

    #[test]
    fn unordered_scores() {
        // both policies still choose when no score compares
        let game = TreeGame::new(node(vec![leaf(1.0), leaf(2.0), leaf(3.0)]), 1);
        let nan = |_: &TreeGame| f64::NAN;
        let eval = Lookahead(&nan);
        assert_eq!(ReflexAgent::new(TieBreak::First).action(&game, &eval), Some(0));
        let pick = ReflexAgent::new(TieBreak::Seeded(5)).action(&game, &eval);
        assert!(matches!(pick, Some(0..=2)));
    }

    #[test]
    fn decision() {
        let game = TreeGame::new(node(vec![leaf(1.0), leaf(7.0), leaf(3.0)]), 2);
        let decision = ReflexAgent::default().decide(&game, &Lookahead(&ScoreEvaluation));
        assert_eq!(decision.action, Some(1));
        assert_eq!(decision.value, 7.0);
        assert_eq!(decision.nodes, 3);
    }

    #[test]
    fn config() {
        let agent: ReflexAgent = serde_json::from_str(r#"{"tie_break":{"Seeded":9}}"#).unwrap();
        assert_eq!(agent.tie_break, TieBreak::Seeded(9));
        let agent: ReflexAgent = serde_json::from_str("{}").unwrap();
        assert_eq!(agent.tie_break, TieBreak::First);
    }
}
