use log::debug;

use super::{next_ply, Context, Decision, GameState};
use crate::eval::Evaluation;
use crate::Error;

/// Expectimax tree search.
///
/// Agent 0 maximizes. The adversaries are modeled as choosing uniformly at random
/// from their legal actions, their value is the mean of all successors.
pub fn expectimax<G, E>(state: &G, depth: usize, eval: &E) -> Result<Decision<G::Action>, Error>
where
    G: GameState,
    E: Evaluation<G> + ?Sized,
{
    let mut ctx = Context::new(state, depth, eval)?;
    let (value, action) = expectimax_rec(&mut ctx, state, 0, 0)?;
    let decision = ctx.finish(value, action);
    debug!(
        "expectimax depth={depth} nodes={} value={} action={:?}",
        decision.nodes, decision.value, decision.action
    );
    Ok(decision)
}

fn expectimax_rec<G, E>(
    ctx: &mut Context<E>,
    state: &G,
    agent: usize,
    round: usize,
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
        let mut max = f64::NEG_INFINITY;
        let mut chosen = None;
        for action in actions {
            let (val, _) = expectimax_rec(
                ctx,
                &state.successor(agent, &action),
                next_agent,
                next_round,
            )?;
            if chosen.is_none() || val > max {
                max = val;
                chosen = Some(action);
            }
        }
        Ok((max, chosen))
    } else {
        let count = actions.len();
        let mut total = 0.0;
        for action in actions {
            let (val, _) = expectimax_rec(
                ctx,
                &state.successor(agent, &action),
                next_agent,
                next_round,
            )?;
            total += val;
        }
        Ok((total / count as f64, None))
    }
}
