use log::debug;

use super::{next_ply, Context, Decision, GameState};
use crate::eval::Evaluation;
use crate::Error;

/// Alpha-Beta tree search.
///
/// @see https://en.wikipedia.org/wiki/Alpha%E2%80%93beta_pruning
/// - Assumes the maximizing agent has id 0, all others minimize
/// - Returns the same action and value as [`minimax`](super::minimax) while visiting
///   at most as many nodes
pub fn alphabeta<G, E>(state: &G, depth: usize, eval: &E) -> Result<Decision<G::Action>, Error>
where
    G: GameState,
    E: Evaluation<G> + ?Sized,
{
    let mut ctx = Context::new(state, depth, eval)?;
    let (value, action) = alphabeta_rec(
        &mut ctx,
        state,
        0,
        0,
        f64::NEG_INFINITY,
        f64::INFINITY,
    )?;
    let decision = ctx.finish(value, action);
    debug!(
        "alphabeta depth={depth} nodes={} value={} action={:?}",
        decision.nodes, decision.value, decision.action
    );
    Ok(decision)
}

fn alphabeta_rec<G, E>(
    ctx: &mut Context<E>,
    state: &G,
    agent: usize,
    round: usize,
    mut alpha: f64,
    mut beta: f64,
) -> Result<(f64, Option<G::Action>), Error>
where
    G: GameState,
    E: Evaluation<G> + ?Sized,
{
    if let Some(value) = ctx.leaf(state, round) {
        return Ok((value, None));
    }

    let actions = ctx.actions(state, agent, round)?;
    if actions.is_empty() {
        return Ok((ctx.evaluate(state), None));
    }

    let (next_agent, next_round) = next_ply(agent, round, state.num_agents());

    if agent == 0 {
        let mut value = f64::NEG_INFINITY;
        let mut chosen = None;
        for action in actions {
            let (newval, _) = alphabeta_rec(
                ctx,
                &state.successor(agent, &action),
                next_agent,
                next_round,
                alpha,
                beta,
            )?;
            if chosen.is_none() || newval > value {
                value = newval;
                chosen = Some(action);
            }
            // a minimizing ancestor already has a better option
            if value > beta {
                return Ok((value, chosen));
            }
            alpha = alpha.max(value);
        }
        Ok((value, chosen))
    } else {
        let mut value = f64::INFINITY;
        let mut chosen = None;
        for action in actions {
            let (newval, _) = alphabeta_rec(
                ctx,
                &state.successor(agent, &action),
                next_agent,
                next_round,
                alpha,
                beta,
            )?;
            if chosen.is_none() || newval < value {
                value = newval;
                chosen = Some(action);
            }
            // the maximizing ancestor already has a better option
            if value < alpha {
                return Ok((value, chosen));
            }
            beta = beta.min(value);
        }
        Ok((value, chosen))
    }
}
