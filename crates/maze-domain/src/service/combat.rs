//! Combat Resolver - Rock, paper, scissors for keys
//!
//! ```text
//!  ┌──────┐ begin() ┌──────────────────┐ both chosen ┌──────────┐ finish() ┌──────┐
//!  │ IDLE │────────▶│ AWAITING_CHOICES │────────────▶│ RESOLVED │─────────▶│ IDLE │
//!  └──────┘         └──────────────────┘             └──────────┘          └──────┘
//!       ▲                    │ abort()                     │ abort()
//!       └────────────────────┴─────────────────────────────┘
//! ```
//!
//! The resolver only knows about the two participants and their moves.
//! Timing (automated delay, cooldown) belongs to the SessionCoordinator.

use crate::model::agent::{Agent, AgentId, ControlMode};
use crate::model::token::KeyType;
use crate::port::random::RandomSource;
use crate::repository::agent_repository::{AgentRepository, RepositoryError};

/// Identifier of one duel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Duel timing and house rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatRules {
    /// Shortest "thinking" delay for an automated participant
    pub auto_choice_min_ms: u64,
    /// Longest "thinking" delay for an automated participant
    pub auto_choice_max_ms: u64,
    /// How long the result stays on screen before movement resumes
    pub cooldown_ms: u64,
    /// Winner hands a random key back to the loser after a steal
    pub swap_back: bool,
    /// Delay between the steal and the swap-back
    pub swap_back_delay_ms: u64,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            auto_choice_min_ms: 1000,
            auto_choice_max_ms: 3000,
            cooldown_ms: 3000,
            swap_back: true,
            swap_back_delay_ms: 1000,
        }
    }
}

/// Current state of the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatPhase {
    Idle,
    AwaitingChoices,
    Resolved,
}

/// One side of a duel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub agent_id: AgentId,
    pub control: ControlMode,
    pub choice: Option<KeyType>,
}

/// Head-to-head result of two moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duel {
    Tie,
    FirstWins,
    SecondWins,
}

impl Duel {
    /// Decide a duel using the dominance relation
    pub fn between(first: KeyType, second: KeyType) -> Duel {
        if first == second {
            Duel::Tie
        } else if first.beats(second) {
            Duel::FirstWins
        } else {
            Duel::SecondWins
        }
    }
}

/// What the outcome did to the loser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatResult {
    /// Same move on both sides; nothing changes
    Tie,
    /// Loser had at most one key and is out of the game
    Eliminated,
    /// Winner took `key` from the loser; `kept` is false if the winner was full
    Stolen { key: KeyType, kept: bool },
}

impl CombatResult {
    pub fn label(&self) -> &'static str {
        match self {
            CombatResult::Tie => "tie",
            CombatResult::Eliminated => "eliminated",
            CombatResult::Stolen { .. } => "stolen",
        }
    }
}

impl core::fmt::Display for CombatResult {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CombatResult::Tie => write!(f, "tie"),
            CombatResult::Eliminated => write!(f, "eliminated"),
            CombatResult::Stolen { key, kept: true } => write!(f, "stole a {} key", key),
            CombatResult::Stolen { key, kept: false } => {
                write!(f, "stole a {} key (discarded, winner is full)", key)
            }
        }
    }
}

/// The applied outcome of a duel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub winner: Option<AgentId>,
    pub loser: Option<AgentId>,
    pub result: CombatResult,
    /// A swap-back should follow after the configured delay
    pub swap_back_due: bool,
}

/// A duel in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatSession {
    id: SessionId,
    participants: [Participant; 2],
    verdict: Option<Verdict>,
}

impl CombatSession {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn participants(&self) -> &[Participant; 2] {
        &self.participants
    }

    pub fn involves(&self, id: &AgentId) -> bool {
        self.participants.iter().any(|p| &p.agent_id == id)
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }

    /// Both moves, if both are in
    pub fn choices(&self) -> Option<(KeyType, KeyType)> {
        match (self.participants[0].choice, self.participants[1].choice) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }
}

/// Result of submitting a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceOutcome {
    /// No session, not a participant, already chosen, or already resolved
    Ignored,
    /// Recorded; the other side has not chosen yet
    Waiting,
    /// Recorded; both moves are in
    Complete,
}

/// CombatResolver - The duel state machine
#[derive(Debug, Clone)]
pub struct CombatResolver {
    phase: CombatPhase,
    session: Option<CombatSession>,
}

impl CombatResolver {
    pub fn new() -> Self {
        Self {
            phase: CombatPhase::Idle,
            session: None,
        }
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn session(&self) -> Option<&CombatSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.phase != CombatPhase::Idle
    }

    /// IDLE -> AWAITING_CHOICES
    pub fn begin(
        &mut self,
        id: SessionId,
        first: &Agent,
        second: &Agent,
    ) -> Result<(), CombatError> {
        if self.is_active() {
            return Err(CombatError::AlreadyActive);
        }
        if first.id() == second.id() {
            return Err(CombatError::SameAgent {
                id: first.id().clone(),
            });
        }

        let participant = |agent: &Agent| Participant {
            agent_id: agent.id().clone(),
            control: agent.control(),
            choice: None,
        };

        self.session = Some(CombatSession {
            id,
            participants: [participant(first), participant(second)],
            verdict: None,
        });
        self.phase = CombatPhase::AwaitingChoices;
        Ok(())
    }

    /// Record a move. A second move for the same participant is ignored.
    pub fn submit_choice(&mut self, agent_id: &AgentId, choice: KeyType) -> ChoiceOutcome {
        if self.phase != CombatPhase::AwaitingChoices {
            return ChoiceOutcome::Ignored;
        }
        let Some(session) = self.session.as_mut() else {
            return ChoiceOutcome::Ignored;
        };
        let Some(participant) = session
            .participants
            .iter_mut()
            .find(|p| &p.agent_id == agent_id)
        else {
            return ChoiceOutcome::Ignored;
        };
        if participant.choice.is_some() {
            return ChoiceOutcome::Ignored;
        }

        participant.choice = Some(choice);

        if session.choices().is_some() {
            ChoiceOutcome::Complete
        } else {
            ChoiceOutcome::Waiting
        }
    }

    /// AWAITING_CHOICES -> RESOLVED: decide the duel and apply the outcome
    pub fn resolve<A>(
        &mut self,
        agents: &mut A,
        rules: &CombatRules,
        rng: &mut dyn RandomSource,
    ) -> Result<Verdict, CombatError>
    where
        A: AgentRepository + ?Sized,
    {
        if self.phase != CombatPhase::AwaitingChoices {
            return Err(CombatError::NotActive);
        }
        let session = self.session.as_mut().ok_or(CombatError::NotActive)?;
        let (first_choice, second_choice) =
            session.choices().ok_or(CombatError::MissingChoices)?;

        let [first, second] = &session.participants;
        let verdict = match Duel::between(first_choice, second_choice) {
            Duel::Tie => Verdict {
                winner: None,
                loser: None,
                result: CombatResult::Tie,
                swap_back_due: false,
            },
            Duel::FirstWins => {
                apply_outcome(agents, &first.agent_id, &second.agent_id, rules, rng)?
            }
            Duel::SecondWins => {
                apply_outcome(agents, &second.agent_id, &first.agent_id, rules, rng)?
            }
        };

        session.verdict = Some(verdict.clone());
        self.phase = CombatPhase::Resolved;
        Ok(verdict)
    }

    /// RESOLVED -> IDLE after the cooldown
    pub fn finish(&mut self) -> Option<CombatSession> {
        if self.phase != CombatPhase::Resolved {
            return None;
        }
        self.phase = CombatPhase::Idle;
        self.session.take()
    }

    /// Any state -> IDLE, dropping the session
    pub fn abort(&mut self) -> Option<CombatSession> {
        self.phase = CombatPhase::Idle;
        self.session.take()
    }
}

impl Default for CombatResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply a non-tie outcome: eliminate the loser or steal one key
pub fn apply_outcome<A>(
    agents: &mut A,
    winner_id: &AgentId,
    loser_id: &AgentId,
    rules: &CombatRules,
    rng: &mut dyn RandomSource,
) -> Result<Verdict, CombatError>
where
    A: AgentRepository + ?Sized,
{
    let mut winner = agents
        .find_by_id(winner_id)?
        .ok_or_else(|| CombatError::ParticipantMissing {
            id: winner_id.clone(),
        })?;
    let mut loser = agents
        .find_by_id(loser_id)?
        .ok_or_else(|| CombatError::ParticipantMissing {
            id: loser_id.clone(),
        })?;

    if loser.inventory().len() <= 1 {
        loser.eliminate();
        agents.unregister(loser_id)?;
        return Ok(Verdict {
            winner: Some(winner_id.clone()),
            loser: Some(loser_id.clone()),
            result: CombatResult::Eliminated,
            swap_back_due: false,
        });
    }

    // Removal from the loser is unconditional; the winner only keeps it if there is room.
    let key = match loser.inventory_mut().take_random(rng) {
        Some(key) => key,
        None => {
            return Err(CombatError::ParticipantMissing {
                id: loser_id.clone(),
            })
        }
    };
    let kept = winner.inventory_mut().add(key);

    agents.save(&loser)?;
    agents.save(&winner)?;

    Ok(Verdict {
        winner: Some(winner_id.clone()),
        loser: Some(loser_id.clone()),
        result: CombatResult::Stolen { key, kept },
        swap_back_due: rules.swap_back && kept && winner.inventory().len() > 1,
    })
}

/// Move one random key from the winner back to the loser
///
/// Skipped (returns `None`) when either agent is gone, the winner holds
/// a single key, or the loser has no room.
pub fn swap_back<A>(
    agents: &mut A,
    winner_id: &AgentId,
    loser_id: &AgentId,
    rng: &mut dyn RandomSource,
) -> Result<Option<KeyType>, RepositoryError>
where
    A: AgentRepository + ?Sized,
{
    let (Some(mut winner), Some(mut loser)) =
        (agents.find_by_id(winner_id)?, agents.find_by_id(loser_id)?)
    else {
        return Ok(None);
    };
    if winner.inventory().len() <= 1 || loser.inventory().is_full() {
        return Ok(None);
    }

    let Some(key) = winner.inventory_mut().take_random(rng) else {
        return Ok(None);
    };
    loser.inventory_mut().add(key);

    agents.save(&winner)?;
    agents.save(&loser)?;
    Ok(Some(key))
}

/// Errors that can occur in the CombatResolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatError {
    /// A duel is already running
    AlreadyActive,
    /// An agent cannot duel itself
    SameAgent { id: AgentId },
    /// resolve() outside AWAITING_CHOICES
    NotActive,
    /// resolve() before both moves are in
    MissingChoices,
    /// A participant vanished from the registry
    ParticipantMissing { id: AgentId },
    Repository(RepositoryError),
}

impl From<RepositoryError> for CombatError {
    fn from(err: RepositoryError) -> Self {
        CombatError::Repository(err)
    }
}

impl core::fmt::Display for CombatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CombatError::AlreadyActive => write!(f, "A duel is already in progress"),
            CombatError::SameAgent { id } => write!(f, "Agent {} cannot duel itself", id),
            CombatError::NotActive => write!(f, "No duel is waiting for moves"),
            CombatError::MissingChoices => write!(f, "Both moves are required to resolve"),
            CombatError::ParticipantMissing { id } => {
                write!(f, "Duel participant {} is no longer registered", id)
            }
            CombatError::Repository(err) => write!(f, "{}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::random::SequenceRandom;
    use std::collections::BTreeMap;
    use KeyType::{Paper, Rock, Scissors};

    #[derive(Default)]
    struct Registry {
        agents: BTreeMap<AgentId, Agent>,
    }

    impl AgentRepository for Registry {
        fn save(&mut self, agent: &Agent) -> Result<(), RepositoryError> {
            self.agents.insert(agent.id().clone(), agent.clone());
            Ok(())
        }

        fn find_by_id(&self, id: &AgentId) -> Result<Option<Agent>, RepositoryError> {
            Ok(self.agents.get(id).cloned())
        }

        fn unregister(&mut self, id: &AgentId) -> Result<bool, RepositoryError> {
            Ok(self.agents.remove(id).is_some())
        }

        fn list_all(&self) -> Result<Vec<Agent>, RepositoryError> {
            Ok(self.agents.values().cloned().collect())
        }

        fn count(&self) -> Result<usize, RepositoryError> {
            Ok(self.agents.len())
        }
    }

    fn agent(id: &str, keys: &[KeyType]) -> Agent {
        Agent::new(AgentId::new(id), ControlMode::Human).with_keys(keys.iter().copied())
    }

    fn registry(agents: &[Agent]) -> Registry {
        let mut registry = Registry::default();
        for a in agents {
            registry.save(a).unwrap();
        }
        registry
    }

    fn id(s: &str) -> AgentId {
        AgentId::new(s)
    }

    #[test]
    fn test_duel_between() {
        assert_eq!(Duel::between(Rock, Rock), Duel::Tie);
        assert_eq!(Duel::between(Rock, Scissors), Duel::FirstWins);
        assert_eq!(Duel::between(Rock, Paper), Duel::SecondWins);
    }

    #[test]
    fn test_second_choice_is_ignored() {
        let (a, b) = (agent("a", &[Rock]), agent("b", &[Paper]));
        let mut resolver = CombatResolver::new();
        resolver.begin(SessionId::new(1), &a, &b).unwrap();

        assert_eq!(resolver.submit_choice(&id("a"), Rock), ChoiceOutcome::Waiting);
        assert_eq!(resolver.submit_choice(&id("a"), Paper), ChoiceOutcome::Ignored);
        assert_eq!(resolver.submit_choice(&id("stranger"), Paper), ChoiceOutcome::Ignored);
        assert_eq!(resolver.submit_choice(&id("b"), Scissors), ChoiceOutcome::Complete);

        assert_eq!(resolver.session().unwrap().choices(), Some((Rock, Scissors)));
    }

    #[test]
    fn test_begin_rejects_when_active_or_self() {
        let (a, b) = (agent("a", &[Rock]), agent("b", &[Paper]));
        let mut resolver = CombatResolver::new();

        assert!(matches!(
            resolver.begin(SessionId::new(1), &a, &a),
            Err(CombatError::SameAgent { .. })
        ));
        resolver.begin(SessionId::new(1), &a, &b).unwrap();
        assert_eq!(
            resolver.begin(SessionId::new(2), &a, &b),
            Err(CombatError::AlreadyActive)
        );
    }

    #[test]
    fn test_tie_changes_nothing() {
        let (a, b) = (agent("a", &[Rock, Paper]), agent("b", &[Scissors]));
        let mut agents = registry(&[a.clone(), b.clone()]);
        let mut resolver = CombatResolver::new();
        let mut rng = SequenceRandom::default();

        resolver.begin(SessionId::new(1), &a, &b).unwrap();
        resolver.submit_choice(&id("a"), Rock);
        resolver.submit_choice(&id("b"), Rock);
        let verdict = resolver
            .resolve(&mut agents, &CombatRules::default(), &mut rng)
            .unwrap();

        assert_eq!(verdict.result, CombatResult::Tie);
        assert_eq!(verdict.winner, None);
        assert_eq!(agents.find_by_id(&id("a")).unwrap().unwrap().keys(), &[Rock, Paper]);
        assert_eq!(agents.find_by_id(&id("b")).unwrap().unwrap().keys(), &[Scissors]);
        assert_eq!(resolver.phase(), CombatPhase::Resolved);

        assert!(resolver.finish().is_some());
        assert_eq!(resolver.phase(), CombatPhase::Idle);
    }

    #[test]
    fn test_single_key_loser_is_eliminated() {
        let (winner, loser) = (agent("w", &[Paper, Rock]), agent("l", &[Scissors]));
        let mut agents = registry(&[winner.clone(), loser.clone()]);
        let mut rng = SequenceRandom::default();

        let rules = CombatRules::default();
        let verdict = apply_outcome(&mut agents, &id("w"), &id("l"), &rules, &mut rng).unwrap();

        assert_eq!(verdict.result, CombatResult::Eliminated);
        assert!(agents.find_by_id(&id("l")).unwrap().is_none());
        assert_eq!(agents.find_by_id(&id("w")).unwrap().unwrap().keys(), &[Paper, Rock]);
    }

    #[test]
    fn test_steal_from_three_key_loser() {
        let (winner, loser) = (agent("w", &[Paper]), agent("l", &[Rock, Paper, Scissors]));
        let mut agents = registry(&[winner, loser]);
        let mut rng = SequenceRandom::new([2]);

        let rules = CombatRules::default();
        let verdict = apply_outcome(&mut agents, &id("w"), &id("l"), &rules, &mut rng).unwrap();

        assert_eq!(
            verdict.result,
            CombatResult::Stolen {
                key: Scissors,
                kept: true
            }
        );
        assert!(verdict.swap_back_due);
        assert_eq!(agents.find_by_id(&id("l")).unwrap().unwrap().keys(), &[Rock, Paper]);
        assert_eq!(agents.find_by_id(&id("w")).unwrap().unwrap().keys(), &[Paper, Scissors]);
    }

    #[test]
    fn test_full_winner_discards_stolen_key() {
        let (winner, loser) = (
            agent("w", &[Paper, Paper, Paper]),
            agent("l", &[Rock, Scissors]),
        );
        let mut agents = registry(&[winner, loser]);
        let mut rng = SequenceRandom::new([0]);

        let rules = CombatRules::default();
        let verdict = apply_outcome(&mut agents, &id("w"), &id("l"), &rules, &mut rng).unwrap();

        assert_eq!(verdict.result, CombatResult::Stolen { key: Rock, kept: false });
        assert!(!verdict.swap_back_due);
        assert_eq!(agents.find_by_id(&id("l")).unwrap().unwrap().keys(), &[Scissors]);
        assert_eq!(agents.find_by_id(&id("w")).unwrap().unwrap().inventory().len(), 3);
    }

    #[test]
    fn test_swap_back_disabled_by_rules() {
        let (winner, loser) = (agent("w", &[Paper]), agent("l", &[Rock, Rock]));
        let mut agents = registry(&[winner, loser]);
        let rules = CombatRules {
            swap_back: false,
            ..CombatRules::default()
        };
        let mut rng = SequenceRandom::default();

        let verdict = apply_outcome(&mut agents, &id("w"), &id("l"), &rules, &mut rng).unwrap();
        assert!(!verdict.swap_back_due);
    }

    #[test]
    fn test_swap_back_moves_one_key() {
        let (winner, loser) = (agent("w", &[Paper, Scissors]), agent("l", &[Rock]));
        let mut agents = registry(&[winner, loser]);
        let mut rng = SequenceRandom::new([1]);

        let key = swap_back(&mut agents, &id("w"), &id("l"), &mut rng).unwrap();

        assert_eq!(key, Some(Scissors));
        assert_eq!(agents.find_by_id(&id("w")).unwrap().unwrap().keys(), &[Paper]);
        assert_eq!(agents.find_by_id(&id("l")).unwrap().unwrap().keys(), &[Rock, Scissors]);
    }

    #[test]
    fn test_swap_back_skipped_for_missing_loser() {
        let winner = agent("w", &[Paper, Scissors]);
        let mut agents = registry(&[winner]);
        let mut rng = SequenceRandom::default();

        assert_eq!(swap_back(&mut agents, &id("w"), &id("gone"), &mut rng).unwrap(), None);
        assert_eq!(agents.find_by_id(&id("w")).unwrap().unwrap().inventory().len(), 2);
    }

    #[test]
    fn test_swap_back_skipped_for_full_loser() {
        let winner = agent("w", &[Paper, Scissors]);
        let loser = agent("l", &[Rock, Rock, Rock]);
        let mut agents = registry(&[winner, loser]);
        let mut rng = SequenceRandom::default();

        assert_eq!(swap_back(&mut agents, &id("w"), &id("l"), &mut rng).unwrap(), None);
        assert_eq!(agents.find_by_id(&id("w")).unwrap().unwrap().keys(), &[Paper, Scissors]);
        assert_eq!(agents.find_by_id(&id("l")).unwrap().unwrap().keys(), &[Rock, Rock, Rock]);
    }

    #[test]
    fn test_swap_back_skipped_for_single_key_winner() {
        let winner = agent("w", &[Paper]);
        let loser = agent("l", &[Rock]);
        let mut agents = registry(&[winner, loser]);
        let mut rng = SequenceRandom::default();

        assert_eq!(swap_back(&mut agents, &id("w"), &id("l"), &mut rng).unwrap(), None);
        assert_eq!(agents.find_by_id(&id("w")).unwrap().unwrap().keys(), &[Paper]);
        assert_eq!(agents.find_by_id(&id("l")).unwrap().unwrap().keys(), &[Rock]);
    }

    #[test]
    fn test_abort_returns_to_idle() {
        let (a, b) = (agent("a", &[Rock]), agent("b", &[Paper]));
        let mut resolver = CombatResolver::new();
        resolver.begin(SessionId::new(9), &a, &b).unwrap();

        let aborted = resolver.abort().unwrap();
        assert_eq!(aborted.id(), SessionId::new(9));
        assert!(!resolver.is_active());
        assert!(resolver.finish().is_none());
    }
}
