//! Session Coordinator - One duel at a time, world-wide
//!
//! The coordinator owns the global "a duel is active" flag (which is
//! simply whether its resolver is out of IDLE) and the deferred work
//! that hangs off a duel:
//!
//! 1. Start: freeze both agents, ask humans for a move, schedule the
//!    automated player's move after a random delay
//! 2. Resolve: as soon as both moves are in, apply the outcome
//! 3. Swap-back: optionally hand one key back to the loser
//! 4. Cooldown: unfreeze, clear the flag, back to IDLE
//!
//! Every scheduled task carries its session id. Tasks of a session that
//! has already finished or been aborted are dropped when they fire.

use crate::event::GameEvent;
use crate::model::agent::{Agent, AgentId};
use crate::model::token::KeyType;
use crate::port::random::RandomSource;
use crate::repository::agent_repository::AgentRepository;
use crate::service::combat::{
    self, ChoiceOutcome, CombatError, CombatPhase, CombatResolver, CombatResult, CombatRules,
    CombatSession, SessionId,
};
use crate::service::scheduler::Scheduler;

/// Deferred work belonging to one duel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatTask {
    /// The automated participant "decides" now
    AutomatedChoice {
        session: SessionId,
        agent_id: AgentId,
    },
    /// The winner hands one key back to the loser
    SwapBack {
        session: SessionId,
        winner: AgentId,
        loser: AgentId,
    },
    /// Display time is over; release the participants
    Cooldown { session: SessionId },
}

impl CombatTask {
    pub fn session(&self) -> SessionId {
        match self {
            CombatTask::AutomatedChoice { session, .. }
            | CombatTask::SwapBack { session, .. }
            | CombatTask::Cooldown { session } => *session,
        }
    }
}

/// SessionCoordinator - Gatekeeper of the combat state machine
#[derive(Debug, Clone)]
pub struct SessionCoordinator {
    rules: CombatRules,
    resolver: CombatResolver,
    tasks: Scheduler<CombatTask>,
    next_session: u64,
}

impl SessionCoordinator {
    pub fn new(rules: CombatRules) -> Self {
        Self {
            rules,
            resolver: CombatResolver::new(),
            tasks: Scheduler::new(),
            next_session: 1,
        }
    }

    pub fn rules(&self) -> &CombatRules {
        &self.rules
    }

    /// The global flag the proximity detector checks
    pub fn is_active(&self) -> bool {
        self.resolver.is_active()
    }

    pub fn phase(&self) -> CombatPhase {
        self.resolver.phase()
    }

    pub fn session(&self) -> Option<&CombatSession> {
        self.resolver.session()
    }

    /// Number of deferred tasks still waiting to fire
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Start a duel between two agents
    ///
    /// Returns `Ok(false)` without changing anything when a duel is already
    /// active, when both ids are the same, or when either agent is missing
    /// or eliminated.
    pub fn try_start_combat<A>(
        &mut self,
        agents: &mut A,
        a: &AgentId,
        b: &AgentId,
        now_ms: u64,
        rng: &mut dyn RandomSource,
        events: &mut Vec<GameEvent>,
    ) -> Result<bool, CombatError>
    where
        A: AgentRepository + ?Sized,
    {
        if self.is_active() || a == b {
            return Ok(false);
        }

        let (Some(mut first), Some(mut second)) = (agents.find_by_id(a)?, agents.find_by_id(b)?)
        else {
            return Ok(false);
        };
        if !first.is_alive() || !second.is_alive() {
            return Ok(false);
        }

        let session = SessionId::new(self.next_session);
        self.resolver.begin(session, &first, &second)?;
        self.next_session += 1;

        first.freeze();
        second.freeze();
        agents.save(&first)?;
        agents.save(&second)?;

        events.push(GameEvent::CombatStarted {
            session_id: session,
            first: first.id().clone(),
            second: second.id().clone(),
        });

        for participant in [&first, &second] {
            self.request_choice(session, participant, now_ms, rng, events);
        }

        Ok(true)
    }

    fn request_choice(
        &mut self,
        session: SessionId,
        agent: &Agent,
        now_ms: u64,
        rng: &mut dyn RandomSource,
        events: &mut Vec<GameEvent>,
    ) {
        if agent.is_automated() {
            let delay = rng.between(self.rules.auto_choice_min_ms, self.rules.auto_choice_max_ms);
            self.tasks.schedule(
                now_ms + delay,
                CombatTask::AutomatedChoice {
                    session,
                    agent_id: agent.id().clone(),
                },
            );
        } else {
            events.push(GameEvent::ChoicePending {
                session_id: session,
                agent_id: agent.id().clone(),
            });
        }
    }

    /// Deliver a participant's move
    ///
    /// Returns `Ok(false)` when the move was ignored (no duel waiting,
    /// not a participant, or already chosen). Resolves immediately once
    /// both moves are in.
    pub fn submit_choice<A>(
        &mut self,
        agents: &mut A,
        agent_id: &AgentId,
        choice: KeyType,
        now_ms: u64,
        rng: &mut dyn RandomSource,
        events: &mut Vec<GameEvent>,
    ) -> Result<bool, CombatError>
    where
        A: AgentRepository + ?Sized,
    {
        let Some(session) = self.resolver.session().map(|s| s.id()) else {
            return Ok(false);
        };

        match self.resolver.submit_choice(agent_id, choice) {
            ChoiceOutcome::Ignored => Ok(false),
            ChoiceOutcome::Waiting => {
                events.push(GameEvent::ChoiceMade {
                    session_id: session,
                    agent_id: agent_id.clone(),
                });
                Ok(true)
            }
            ChoiceOutcome::Complete => {
                events.push(GameEvent::ChoiceMade {
                    session_id: session,
                    agent_id: agent_id.clone(),
                });
                self.resolve(agents, session, now_ms, rng, events)?;
                Ok(true)
            }
        }
    }

    fn resolve<A>(
        &mut self,
        agents: &mut A,
        session: SessionId,
        now_ms: u64,
        rng: &mut dyn RandomSource,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), CombatError>
    where
        A: AgentRepository + ?Sized,
    {
        let verdict = match self.resolver.resolve(agents, &self.rules, rng) {
            Ok(verdict) => verdict,
            Err(err) => {
                // Never leave a half-resolved duel holding the global flag
                self.abort_active(agents, "duel could not be resolved", events);
                return Err(err);
            }
        };

        events.push(GameEvent::CombatResolved {
            session_id: session,
            winner: verdict.winner.clone(),
            loser: verdict.loser.clone(),
            result: verdict.result,
        });

        if verdict.result == CombatResult::Eliminated {
            if let Some(loser) = &verdict.loser {
                events.push(GameEvent::AgentEliminated {
                    agent_id: loser.clone(),
                });
            }
        }

        if verdict.swap_back_due {
            if let (Some(winner), Some(loser)) = (verdict.winner, verdict.loser) {
                self.tasks.schedule(
                    now_ms + self.rules.swap_back_delay_ms,
                    CombatTask::SwapBack {
                        session,
                        winner,
                        loser,
                    },
                );
            }
        }

        self.tasks
            .schedule(now_ms + self.rules.cooldown_ms, CombatTask::Cooldown { session });
        Ok(())
    }

    /// Fire every deferred task that is due at `now_ms`
    ///
    /// A failing task does not stop the rest of the batch; the first
    /// error is returned once every task has run.
    pub fn run_due<A>(
        &mut self,
        agents: &mut A,
        now_ms: u64,
        rng: &mut dyn RandomSource,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), CombatError>
    where
        A: AgentRepository + ?Sized,
    {
        let mut first_error = None;
        for task in self.tasks.pop_due(now_ms) {
            if let Err(err) = self.run_task(agents, task, now_ms, rng, events) {
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn run_task<A>(
        &mut self,
        agents: &mut A,
        task: CombatTask,
        now_ms: u64,
        rng: &mut dyn RandomSource,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), CombatError>
    where
        A: AgentRepository + ?Sized,
    {
        let current = self.resolver.session().map(|s| s.id());
        if current != Some(task.session()) {
            return Ok(());
        }

        match task {
            CombatTask::AutomatedChoice { agent_id, .. } => {
                let choice = KeyType::random(rng);
                self.submit_choice(agents, &agent_id, choice, now_ms, rng, events)?;
            }
            CombatTask::SwapBack {
                session,
                winner,
                loser,
            } => {
                if self.resolver.phase() != CombatPhase::Resolved {
                    return Ok(());
                }
                if let Some(key) = combat::swap_back(agents, &winner, &loser, rng)? {
                    events.push(GameEvent::KeySwappedBack {
                        session_id: session,
                        from: winner,
                        to: loser,
                        key_type: key,
                    });
                }
            }
            CombatTask::Cooldown { session } => {
                let finished = self.resolver.finish();
                self.tasks.cancel_where(|t| t.session() == session);
                events.push(GameEvent::CombatEnded {
                    session_id: session,
                });
                if let Some(finished) = finished {
                    self.release(agents, &finished)?;
                }
            }
        }
        Ok(())
    }

    /// Abort the active duel if `agent_id` takes part in it
    ///
    /// Returns whether a duel was aborted. The other participant is unfrozen.
    pub fn abort_for<A>(
        &mut self,
        agents: &mut A,
        agent_id: &AgentId,
        reason: &str,
        events: &mut Vec<GameEvent>,
    ) -> Result<bool, CombatError>
    where
        A: AgentRepository + ?Sized,
    {
        let involved = self
            .resolver
            .session()
            .map(|s| s.involves(agent_id))
            .unwrap_or(false);
        if !involved {
            return Ok(false);
        }

        let Some(aborted) = self.resolver.abort() else {
            return Ok(false);
        };
        let session = aborted.id();
        self.tasks.cancel_where(|t| t.session() == session);
        events.push(GameEvent::CombatAborted {
            session_id: session,
            reason: reason.to_string(),
        });
        self.release(agents, &aborted)?;
        Ok(true)
    }

    /// Drop the active duel after a failure
    ///
    /// Unfreezing is best effort; the flag is cleared either way.
    fn abort_active<A>(&mut self, agents: &mut A, reason: &str, events: &mut Vec<GameEvent>)
    where
        A: AgentRepository + ?Sized,
    {
        let Some(aborted) = self.resolver.abort() else {
            return;
        };
        let session = aborted.id();
        self.tasks.cancel_where(|t| t.session() == session);
        events.push(GameEvent::CombatAborted {
            session_id: session,
            reason: reason.to_string(),
        });
        let _ = self.release(agents, &aborted);
    }

    /// Unfreeze every participant still registered
    fn release<A>(&self, agents: &mut A, session: &CombatSession) -> Result<(), CombatError>
    where
        A: AgentRepository + ?Sized,
    {
        for participant in session.participants() {
            if let Some(mut agent) = agents.find_by_id(&participant.agent_id)? {
                agent.unfreeze();
                agents.save(&agent)?;
            }
        }
        Ok(())
    }
}

impl Default for SessionCoordinator {
    fn default() -> Self {
        Self::new(CombatRules::default())
    }
}
