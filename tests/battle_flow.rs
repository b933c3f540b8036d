//! End-to-end battle scenarios.
//!
//! These drive whole fights through the public intent surface and check
//! the headline rules: knockout timing, draw caps, steal against an empty
//! hand, and settlement idempotence.

use tavern_duel::catalog::registry::cards;
use tavern_duel::{
    ActionReport, Battle, BattleBuilder, BattleConfig, CardId, InstanceId, Intent, Outcome,
    PlayError, PlayerId, RewardContext, SettlementReason,
};

const P0: PlayerId = PlayerId(0);
const P1: PlayerId = PlayerId(1);

fn find_in_hand(battle: &Battle, player: PlayerId, card: CardId) -> InstanceId {
    battle.state().players[player]
        .pool
        .hand()
        .iter()
        .copied()
        .find(|&id| battle.state().instance(id).unwrap().card_id == card)
        .expect("card not in hand")
}

// =============================================================================
// Knockout timing
// =============================================================================

/// 100 HP each, round cap 6, passive opponent, one 20-damage attack per
/// player turn: the fifth attack ends the battle on that action, not later.
#[test]
fn test_five_attacks_settle_on_the_fifth_action() {
    let attacker_deck: Vec<CardId> = vec![cards::BOTTLE_SMASH; 10];
    let passive_deck: Vec<CardId> = vec![cards::SPYGLASS_SIP; 10];

    let mut battle = BattleBuilder::new()
        .config(BattleConfig::default().with_max_rounds(6))
        .deck(P0, attacker_deck)
        .deck(P1, passive_deck)
        .build(42);

    for attack in 1..=5 {
        // Player turn: draw, one attack, end turn
        battle.submit(P0, Intent::DrawCard).unwrap();
        let card = find_in_hand(&battle, P0, cards::BOTTLE_SMASH);
        battle
            .submit(P0, Intent::PlayCard { instance: card, target: None })
            .unwrap();

        assert_eq!(battle.state().players[P1].health(), 100 - 20 * attack);

        if attack < 5 {
            assert!(!battle.is_over(), "settled early on attack {attack}");
            battle.submit(P0, Intent::EndTurn).unwrap();

            // Opponent never acts beyond passing
            battle.submit(P1, Intent::DrawCard).unwrap();
            battle.submit(P1, Intent::EndTurn).unwrap();
        }
    }

    // Settled by the fifth attack itself, before any end-turn
    assert!(battle.is_over());
    let settlement = battle.settlement().unwrap();
    assert_eq!(settlement.outcome, Outcome::Victory(P0));
    assert_eq!(settlement.reason, SettlementReason::Knockout);
    assert_eq!(battle.state().players[P1].health(), 0);
}

// =============================================================================
// Draw caps
// =============================================================================

/// Hand limit 7, deck 3, hand 5, request 5: the draw is capped by the
/// smallest of request, deck size, and hand headroom.
#[test]
fn test_draw_capped_by_smallest_bound() {
    let deck: Vec<CardId> = vec![cards::SCALDING_SPLASH; 8];
    // Deal leaves hand 5, deck 3; the draw phase then asks for 5
    let mut config = BattleConfig::default()
        .with_hand_limit(7)
        .with_starting_hand(5);
    config.draw_per_turn = 5;
    let mut battle = BattleBuilder::new()
        .config(config)
        .deck(P0, deck.clone())
        .deck(P1, deck)
        .build(42);

    let report = battle.submit(P0, Intent::DrawCard).unwrap();

    match report {
        ActionReport::Drew { cards, shortfall } => {
            // min(requested 5, deck 3, headroom 2) = 2
            assert_eq!(cards.len(), 2);
            assert_eq!(shortfall, 3);
        }
        other => panic!("unexpected report {other:?}"),
    }
    assert_eq!(battle.state().players[P0].pool.hand().len(), 7);
    assert_eq!(battle.state().players[P0].pool.deck().len(), 1);
}

// =============================================================================
// Steal
// =============================================================================

/// Steal against an empty hand is an expected failure that changes nothing.
#[test]
fn test_steal_against_empty_hand() {
    let config = BattleConfig::default().with_starting_hand(0);
    let mut battle = BattleBuilder::new()
        .config(config)
        .deck(P0, vec![cards::PICKPOCKET_DRAUGHT])
        .deck(P1, vec![cards::SCALDING_SPLASH])
        .build(42);

    battle.submit(P0, Intent::DrawCard).unwrap();
    let card = find_in_hand(&battle, P0, cards::PICKPOCKET_DRAUGHT);

    let err = battle
        .submit(P0, Intent::PlayCard { instance: card, target: None })
        .unwrap_err();

    assert_eq!(err, PlayError::NoCardsToSteal);
    // Neither hand changed: the draught stays in hand, the opponent's
    // hand stays empty
    assert_eq!(battle.state().players[P0].pool.hand(), &[card]);
    assert!(battle.state().players[P1].pool.hand().is_empty());
    assert!(!battle.is_over());
}

/// A successful steal moves exactly one card between the hands.
#[test]
fn test_steal_moves_one_card_between_hands() {
    let config = BattleConfig::default().with_starting_hand(0);
    let mut battle = BattleBuilder::new()
        .config(config)
        .deck(P0, vec![cards::PICKPOCKET_DRAUGHT, cards::SCALDING_SPLASH])
        .deck(P1, vec![cards::SCALDING_SPLASH, cards::MENDED_MUG])
        .build(42);

    // Give the opponent a hand first
    battle.submit(P0, Intent::DrawCard).unwrap();
    battle.submit(P0, Intent::EndTurn).unwrap();
    battle.submit(P1, Intent::DrawCard).unwrap();
    battle.submit(P1, Intent::EndTurn).unwrap();
    battle.submit(P0, Intent::DrawCard).unwrap();

    let p0_before = battle.state().players[P0].pool.hand().len();
    let p1_before = battle.state().players[P1].pool.hand().len();
    assert_eq!(p1_before, 1);

    let draught = find_in_hand(&battle, P0, cards::PICKPOCKET_DRAUGHT);
    battle
        .submit(P0, Intent::PlayCard { instance: draught, target: None })
        .unwrap();

    // The draught went to discard, the stolen card joined P0's hand
    assert_eq!(battle.state().players[P0].pool.hand().len(), p0_before);
    assert!(battle.state().players[P1].pool.hand().is_empty());
}

// =============================================================================
// Settlement
// =============================================================================

/// Settlement happens exactly once; rewards are granted exactly once; a
/// terminal battle rejects every further mutation.
#[test]
fn test_settlement_is_idempotent() {
    let deck: Vec<CardId> = vec![cards::SCALDING_SPLASH; 4];
    let ctx = RewardContext {
        difficulty: 1,
        win_streak: 2,
    };
    let mut battle = BattleBuilder::new()
        .reward_context(ctx)
        .deck(P0, deck.clone())
        .deck(P1, deck)
        .build(42);

    battle.submit(P0, Intent::Forfeit).unwrap();

    let first = battle.settlement().unwrap().clone();
    assert_eq!(first.outcome, Outcome::Victory(P1));
    assert!(first.rewards[P1].gold > 0);
    assert!(first.rewards[P0].rating_delta < 0);

    // A second forfeit (or any intent) fails; the settlement is unchanged
    assert_eq!(
        battle.submit(P1, Intent::Forfeit),
        Err(PlayError::BattleAlreadyEnded)
    );
    assert_eq!(
        battle.submit(P0, Intent::DrawCard),
        Err(PlayError::BattleAlreadyEnded)
    );
    assert_eq!(battle.settlement().unwrap(), &first);
}

/// The log records the whole fight in order.
#[test]
fn test_log_is_append_only_and_ordered() {
    let deck: Vec<CardId> = vec![cards::SCALDING_SPLASH; 6];
    let mut battle = BattleBuilder::new()
        .deck(P0, deck.clone())
        .deck(P1, deck)
        .build(42);

    battle.tick(1_000);
    battle.submit(P0, Intent::DrawCard).unwrap();
    battle.tick(2_000);
    battle.submit(P0, Intent::EndTurn).unwrap();

    let log = battle.state().log();
    assert!(log.len() >= 3);
    let stamps: Vec<u64> = log.iter().map(|e| e.at_ms).collect();
    let mut sorted = stamps.clone();
    sorted.sort_unstable();
    assert_eq!(stamps, sorted, "log stamps must be monotonic");
}
