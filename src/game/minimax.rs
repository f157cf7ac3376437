use log::debug;

use super::{next_ply, Context, Decision, GameState};
use crate::eval::Evaluation;
use crate::Error;

/// Depth limited minimax search.
///
/// Agent 0 maximizes, every other agent minimizes. Among equally valued actions the
/// first one in the order of [`GameState::legal_actions`] is chosen.
pub fn minimax<G, E>(state: &G, depth: usize, eval: &E) -> Result<Decision<G::Action>, Error>
where
    G: GameState,
    E: Evaluation<G> + ?Sized,
{
    let mut ctx = Context::new(state, depth, eval)?;
    let (value, action) = minimax_rec(&mut ctx, state, 0, 0)?;
    let decision = ctx.finish(value, action);
    debug!(
        "minimax depth={depth} nodes={} value={} action={:?}",
        decision.nodes, decision.value, decision.action
    );
    Ok(decision)
}

fn minimax_rec<G, E>(
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
    let maximize = agent == 0;

    let mut best = if maximize {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    let mut chosen = None;
    for action in actions {
        let (value, _) = minimax_rec(
            ctx,
            &state.successor(agent, &action),
            next_agent,
            next_round,
        )?;
        let better = if maximize { value > best } else { value < best };
        if chosen.is_none() || better {
            best = value;
            chosen = Some(action);
        }
    }
    Ok((best, chosen))
}
