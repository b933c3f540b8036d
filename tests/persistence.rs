//! Save-blob round trips and corrupt-blob rejection.
//!
//! The whole battle state is plain serde data: a fight serialized mid-turn
//! must resume exactly where it was, RNG included. A blob that fails
//! validation is rejected with a `SaveError` so the caller can discard the
//! battle instead of crashing.

use tavern_duel::catalog::registry::cards;
use tavern_duel::{
    BattleBuilder, BattleConfig, BattleState, CardId, CardRegistry, Intent, PlayerId,
    RewardContext, SaveError,
};

const P0: PlayerId = PlayerId(0);
const P1: PlayerId = PlayerId(1);

fn mid_battle() -> tavern_duel::Battle {
    let deck: Vec<CardId> = vec![
        cards::SCALDING_SPLASH,
        cards::BOTTLE_SMASH,
        cards::MENDED_MUG,
        cards::OAKEN_TANKARD,
    ]
    .into_iter()
    .cycle()
    .take(12)
    .collect();

    let mut battle = BattleBuilder::new()
        .deck(P0, deck.clone())
        .deck(P1, deck)
        .build(42);

    // Advance a couple of turns so there is real state to save
    battle.submit(P0, Intent::DrawCard).unwrap();
    let hit = battle.state().players[P0].pool.hand()[0];
    let _ = battle.submit(P0, Intent::PlayCard { instance: hit, target: None });
    battle.submit(P0, Intent::EndTurn).unwrap();
    battle.submit(P1, Intent::DrawCard).unwrap();
    battle
}

// =============================================================================
// Round trip
// =============================================================================

#[test]
fn test_mid_battle_roundtrip_resumes_identically() {
    let mut original = mid_battle();

    let blob = serde_json::to_string(original.state()).unwrap();
    let restored: BattleState = serde_json::from_str(&blob).unwrap();
    let mut resumed = tavern_duel::Battle::resume(
        *original.config(),
        tavern_duel::standard_set(),
        RewardContext::default(),
        restored,
    )
    .unwrap();

    // Identical observable state at the restore point
    assert_eq!(resumed.state().turn_count, original.state().turn_count);
    assert_eq!(resumed.state().active, original.state().active);
    assert_eq!(resumed.state().phase, original.state().phase);
    for p in PlayerId::both() {
        assert_eq!(
            resumed.state().players[p],
            original.state().players[p],
            "participant {p} diverged through the blob"
        );
    }
    assert_eq!(resumed.state().log().len(), original.state().log().len());

    // Identical behavior afterwards: the RNG came back too, so the same
    // intents produce the same draws
    let active = original.state().active;
    original.submit(active, Intent::EndTurn).unwrap();
    resumed.submit(active, Intent::EndTurn).unwrap();
    let drew_a = original.submit(P0, Intent::DrawCard).unwrap();
    let drew_b = resumed.submit(P0, Intent::DrawCard).unwrap();
    assert_eq!(drew_a, drew_b);
}

// =============================================================================
// Corrupt blobs
// =============================================================================

#[test]
fn test_blob_with_mismatched_location_is_rejected() {
    let original = mid_battle();
    let mut blob: serde_json::Value = serde_json::to_value(original.state()).unwrap();

    // Claim a card in P0's hand is actually expired
    let in_hand = blob["players"]["data"][0]["pool"]["hand"][0]
        .as_u64()
        .expect("hand holds instance ids");
    blob["instances"][in_hand.to_string()]["location"] = serde_json::json!("Expired");

    let state: BattleState = serde_json::from_value(blob).unwrap();
    let err = tavern_duel::Battle::resume(
        *original.config(),
        tavern_duel::standard_set(),
        RewardContext::default(),
        state,
    )
    .unwrap_err();

    assert!(matches!(err, SaveError::InconsistentZones));
}

#[test]
fn test_blob_with_out_of_range_health_is_rejected() {
    let original = mid_battle();
    let mut blob: serde_json::Value = serde_json::to_value(original.state()).unwrap();

    blob["players"]["data"][0]["health"] = serde_json::json!(9_999);

    let state: BattleState = serde_json::from_value(blob).unwrap();
    let err = tavern_duel::Battle::resume(
        *original.config(),
        tavern_duel::standard_set(),
        RewardContext::default(),
        state,
    )
    .unwrap_err();

    assert!(matches!(err, SaveError::HealthOutOfRange));
}

#[test]
fn test_blob_against_wrong_registry_is_rejected() {
    let original = mid_battle();
    let blob = serde_json::to_string(original.state()).unwrap();
    let state: BattleState = serde_json::from_str(&blob).unwrap();

    // A registry that knows none of the blob's cards
    let err = tavern_duel::Battle::resume(
        *original.config(),
        CardRegistry::new(),
        RewardContext::default(),
        state,
    )
    .unwrap_err();

    assert!(matches!(err, SaveError::UnknownCard(_)));
}

#[test]
fn test_garbage_blob_fails_at_parse() {
    let result: Result<BattleState, _> = serde_json::from_str("{\"turn_count\": \"many\"}");
    assert!(result.is_err());
}

#[test]
fn test_resume_accepts_a_clean_blob_mid_draw_phase() {
    let deck: Vec<CardId> = vec![cards::SCALDING_SPLASH; 6];
    let battle = BattleBuilder::new()
        .config(BattleConfig::default().with_turn_budget_ms(5_000))
        .deck(P0, deck.clone())
        .deck(P1, deck)
        .build(7);

    let blob = serde_json::to_string(battle.state()).unwrap();
    let state: BattleState = serde_json::from_str(&blob).unwrap();
    let mut resumed = tavern_duel::Battle::resume(
        *battle.config(),
        tavern_duel::standard_set(),
        RewardContext::default(),
        state,
    )
    .unwrap();

    // The clock came back too: the turn still times out where it would have
    let outcome = resumed.tick(5_000);
    assert!(outcome.is_some());
}
