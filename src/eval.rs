//! Pluggable scoring of game states, higher is better for agent 0.

use crate::game::GameState;

/// A heuristic that evaluates the game state at the leafs of a tree search.
pub trait Evaluation<G> {
    fn eval(&self, state: &G) -> f64;
}

impl<G, F> Evaluation<G> for F
where
    F: Fn(&G) -> f64,
{
    fn eval(&self, state: &G) -> f64 {
        self(state)
    }
}

/// Uses the score of the game itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEvaluation;

impl<G: GameState> Evaluation<G> for ScoreEvaluation {
    fn eval(&self, state: &G) -> f64 {
        state.score()
    }
}

/// Scores an action of agent 0 in the given state, used by reflex agents.
pub trait ActionEvaluation<G: GameState> {
    fn eval_action(&self, state: &G, action: &G::Action) -> f64;
}

impl<G, F> ActionEvaluation<G> for F
where
    G: GameState,
    F: Fn(&G, &G::Action) -> f64,
{
    fn eval_action(&self, state: &G, action: &G::Action) -> f64 {
        self(state, action)
    }
}

/// One ply lookahead: evaluates the state agent 0 reaches with the action.
#[derive(Debug, Clone, Copy)]
pub struct Lookahead<'a, E: ?Sized>(pub &'a E);

impl<'a, G, E> ActionEvaluation<G> for Lookahead<'a, E>
where
    G: GameState,
    E: Evaluation<G> + ?Sized,
{
    fn eval_action(&self, state: &G, action: &G::Action) -> f64 {
        self.0.eval(&state.successor(0, action))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::testing::{leaf, node, TreeGame};

    #[test]
    fn score_and_lookahead() {
        let game = TreeGame::new(node(vec![leaf(3.0), leaf(-2.0)]), 2);
        assert_eq!(ScoreEvaluation.eval(&game), 0.0);

        let lookahead = Lookahead(&ScoreEvaluation);
        assert_eq!(lookahead.eval_action(&game, &0), 3.0);
        assert_eq!(lookahead.eval_action(&game, &1), -2.0);

        let doubled = |g: &TreeGame| 2.0 * g.score();
        assert_eq!(Lookahead(&doubled).eval_action(&game, &0), 6.0);
    }

    #[test]
    fn closures() {
        let game = TreeGame::new(node(vec![leaf(3.0)]), 1);
        let constant = |_: &TreeGame| 7.0;
        assert_eq!(constant.eval(&game), 7.0);
        let by_action = |_: &TreeGame, action: &usize| *action as f64;
        assert_eq!(by_action.eval_action(&game, &4), 4.0);
    }
}
