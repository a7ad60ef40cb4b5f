//! Event selection: catalog filtering, weighted picks, and the built-in
//! events the engine synthesizes when the catalog has nothing to say.
use rand::Rng;

use crate::data::{Choice, ChoiceEffects, EventCategory, EventData, GameEvent, StatCost};
use crate::schedule::{ScheduleSlot, SlotType};
use crate::state::Player;
use crate::stats::StatKey;

/// Whether an event's mode/role/condition gates all pass for the player.
#[must_use]
pub fn is_eligible(event: &GameEvent, player: &Player) -> bool {
    let mode_ok = event.modes.is_empty()
        || event
            .modes
            .iter()
            .any(|mode| mode.eq_ignore_ascii_case(player.mode.as_str()));
    let role_ok = event.roles.is_empty()
        || event
            .roles
            .iter()
            .any(|role| role.eq_ignore_ascii_case(player.role_name()));
    let condition_ok = event
        .condition
        .as_ref()
        .is_none_or(|condition| condition.matches(player));
    mode_ok && role_ok && condition_ok
}

/// Weighted draw over a candidate slice. Zero weights count as one so a
/// mis-tuned catalog entry can still fire.
pub fn choose_weighted<'a, R: Rng>(
    candidates: &[&'a GameEvent],
    rng: &mut R,
) -> Option<&'a GameEvent> {
    if candidates.is_empty() {
        return None;
    }
    let total: u32 = candidates.iter().map(|event| event.weight.max(1)).sum();
    let mut roll = rng.gen_range(0..total);
    for event in candidates {
        let weight = event.weight.max(1);
        if roll < weight {
            return Some(event);
        }
        roll -= weight;
    }
    None
}

/// Pick a contextual event for the player, avoiding an immediate repeat of
/// the last contextual title. When the anti-repeat filter would empty the
/// pool, the repeat is allowed rather than silencing the day.
pub fn pick_contextual_event<R: Rng>(
    data: &EventData,
    player: &Player,
    rng: &mut R,
) -> Option<GameEvent> {
    let pool: Vec<&GameEvent> = data
        .events
        .iter()
        .filter(|event| event.category == EventCategory::Contextual)
        .filter(|event| is_eligible(event, player))
        .collect();

    let fresh: Vec<&GameEvent> = pool
        .iter()
        .copied()
        .filter(|event| {
            player
                .last_contextual_title
                .as_deref()
                .is_none_or(|last| last != event.title)
        })
        .collect();

    let candidates = if fresh.is_empty() { &pool } else { &fresh };
    choose_weighted(candidates, rng).cloned()
}

/// Pick a catalog event of the given category, or fall back to the built-in
/// for categories the engine must always be able to surface.
pub fn pick_category_event<R: Rng>(
    data: &EventData,
    category: EventCategory,
    player: &Player,
    rng: &mut R,
) -> Option<GameEvent> {
    let pool: Vec<&GameEvent> = data
        .events
        .iter()
        .filter(|event| event.category == category)
        .filter(|event| is_eligible(event, player))
        .collect();
    if let Some(event) = choose_weighted(&pool, rng) {
        return Some(event.clone());
    }
    match category {
        EventCategory::Injury => Some(injury_event()),
        EventCategory::Agent => Some(agent_event()),
        _ => None,
    }
}

/// Built-in injury scare, fired when energy runs dangerously low.
#[must_use]
pub fn injury_event() -> GameEvent {
    GameEvent {
        id: String::from("injury_scare"),
        title: String::from("Injury Scare"),
        desc: String::from(
            "Your knee buckles during a drill. The trainer wants a decision before practice resumes.",
        ),
        weight: 5,
        category: EventCategory::Injury,
        mandatory: true,
        modes: Vec::new(),
        roles: Vec::new(),
        condition: None,
        choices: vec![
            Choice {
                label: String::from("Play through the pain"),
                cost: None,
                effects: ChoiceEffects {
                    energy: -20,
                    morale: -5,
                    professionalism: 1,
                    log: Some(String::from("Gritted through an injury scare.")),
                    ..ChoiceEffects::default()
                },
            },
            Choice {
                label: String::from("Sit out and recover"),
                cost: None,
                effects: ChoiceEffects {
                    energy: 15,
                    morale: -3,
                    log: Some(String::from("Sat out to let the knee settle.")),
                    ..ChoiceEffects::default()
                },
            },
        ],
    }
}

/// Built-in agent check-in, fired on the recurring meeting cadence.
#[must_use]
pub fn agent_event() -> GameEvent {
    GameEvent {
        id: String::from("agent_meeting"),
        title: String::from("Agent Meeting"),
        desc: String::from(
            "Your agent slides a folder across the table. Endorsements, film, and a few hard truths.",
        ),
        weight: 5,
        category: EventCategory::Agent,
        mandatory: true,
        modes: Vec::new(),
        roles: Vec::new(),
        condition: None,
        choices: vec![
            Choice {
                label: String::from("Talk endorsements"),
                cost: Some(StatCost {
                    stat: StatKey::Energy,
                    amount: 10,
                }),
                effects: ChoiceEffects {
                    skill_points: 10,
                    charisma: 1,
                    log: Some(String::from("Signed a small endorsement deal.")),
                    ..ChoiceEffects::default()
                },
            },
            Choice {
                label: String::from("Review film together"),
                cost: None,
                effects: ChoiceEffects {
                    basketball_iq: 1,
                    professionalism: 1,
                    energy: -5,
                    log: Some(String::from("Broke down film with the agent.")),
                    ..ChoiceEffects::default()
                },
            },
            Choice {
                label: String::from("Keep it short"),
                cost: None,
                effects: ChoiceEffects {
                    energy: 5,
                    ..ChoiceEffects::default()
                },
            },
        ],
    }
}

/// Built-in game-day prompt for a schedule slot.
#[must_use]
pub fn game_day_event(slot: &ScheduleSlot) -> GameEvent {
    let title = match slot.slot_type {
        SlotType::Playoff => "Playoff Game",
        SlotType::Championship => "Championship Game",
        _ => "Game Day",
    };
    let opponent = slot.opponent.as_deref().unwrap_or("a rival squad");
    GameEvent {
        id: String::from("game_day"),
        title: title.to_string(),
        desc: format!("Tip-off tonight against {opponent}."),
        weight: 5,
        category: EventCategory::GameDay,
        mandatory: true,
        modes: Vec::new(),
        roles: Vec::new(),
        condition: None,
        choices: vec![Choice {
            label: String::from("Take the court"),
            cost: None,
            effects: ChoiceEffects {
                plays_game: true,
                ..ChoiceEffects::default()
            },
        }],
    }
}

/// Built-in daily prompt shown after automated practice resolves.
#[must_use]
pub fn daily_choice_event() -> GameEvent {
    GameEvent {
        id: String::from("daily_training"),
        title: String::from("After Practice"),
        desc: String::from("Practice wraps up. There are still a few hours left in the day."),
        weight: 5,
        category: EventCategory::Daily,
        mandatory: false,
        modes: Vec::new(),
        roles: Vec::new(),
        condition: None,
        choices: vec![
            Choice {
                label: String::from("Extra conditioning"),
                cost: Some(StatCost {
                    stat: StatKey::Energy,
                    amount: 10,
                }),
                effects: ChoiceEffects {
                    train: Some(StatKey::Athleticism),
                    ..ChoiceEffects::default()
                },
            },
            Choice {
                label: String::from("Film session"),
                cost: Some(StatCost {
                    stat: StatKey::Energy,
                    amount: 5,
                }),
                effects: ChoiceEffects {
                    train: Some(StatKey::BasketballIq),
                    ..ChoiceEffects::default()
                },
            },
            Choice {
                label: String::from("Rest and recover"),
                cost: None,
                effects: ChoiceEffects {
                    energy: 30,
                    morale: 2,
                    ..ChoiceEffects::default()
                },
            },
            Choice {
                label: String::from("Team bonding"),
                cost: Some(StatCost {
                    stat: StatKey::Energy,
                    amount: 5,
                }),
                effects: ChoiceEffects {
                    charisma: 1,
                    morale: 5,
                    ..ChoiceEffects::default()
                },
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::GameMode;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn contextual(id: &str, title: &str, weight: u32) -> GameEvent {
        GameEvent {
            id: id.to_string(),
            title: title.to_string(),
            desc: String::new(),
            weight,
            category: EventCategory::Contextual,
            mandatory: false,
            modes: Vec::new(),
            roles: Vec::new(),
            condition: None,
            choices: Vec::new(),
        }
    }

    #[test]
    fn weighted_pick_tracks_weights() {
        let heavy = contextual("heavy", "Heavy", 90);
        let light = contextual("light", "Light", 10);
        let pool = vec![&heavy, &light];
        let mut rng = ChaCha20Rng::seed_from_u64(21);
        let mut heavy_hits = 0;
        for _ in 0..2000 {
            if choose_weighted(&pool, &mut rng).unwrap().id == "heavy" {
                heavy_hits += 1;
            }
        }
        // Expect ~1800; allow a generous band.
        assert!(
            (1600..=1950).contains(&heavy_hits),
            "heavy picked {heavy_hits} of 2000"
        );
    }

    #[test]
    fn contextual_pick_skips_last_title() {
        let a = contextual("a", "Scout in the Stands", 5);
        let b = contextual("b", "Local Interview", 5);
        let data = EventData::from_events(vec![a, b]);
        let mut player = Player::sample(GameMode::HighSchool);
        player.last_contextual_title = Some(String::from("Scout in the Stands"));
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        for _ in 0..50 {
            let picked = pick_contextual_event(&data, &player, &mut rng).unwrap();
            assert_eq!(picked.title, "Local Interview");
        }
    }

    #[test]
    fn anti_repeat_relaxes_when_pool_is_single() {
        let only = contextual("only", "Scout in the Stands", 5);
        let data = EventData::from_events(vec![only]);
        let mut player = Player::sample(GameMode::HighSchool);
        player.last_contextual_title = Some(String::from("Scout in the Stands"));
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let picked = pick_contextual_event(&data, &player, &mut rng);
        assert!(picked.is_some(), "a one-event pool still fires");
    }

    #[test]
    fn mode_and_role_gates_filter_candidates() {
        let mut gated = contextual("gated", "Pro Only", 5);
        gated.modes = vec![String::from("professional")];
        gated.roles = vec![String::from("Starter")];
        let data = EventData::from_events(vec![gated]);
        let mut rng = ChaCha20Rng::seed_from_u64(3);

        let rookie = Player::sample(GameMode::HighSchool);
        assert!(pick_contextual_event(&data, &rookie, &mut rng).is_none());

        let mut veteran = Player::sample(GameMode::Professional);
        veteran.role_tier = 3; // Starter
        assert!(pick_contextual_event(&data, &veteran, &mut rng).is_some());
    }

    #[test]
    fn category_pick_falls_back_to_builtins() {
        let data = EventData::empty();
        let player = Player::sample(GameMode::College);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let injury = pick_category_event(&data, EventCategory::Injury, &player, &mut rng).unwrap();
        assert!(injury.mandatory);
        assert_eq!(injury.category, EventCategory::Injury);
        let agent = pick_category_event(&data, EventCategory::Agent, &player, &mut rng).unwrap();
        assert_eq!(agent.id, "agent_meeting");
        assert!(
            pick_category_event(&data, EventCategory::Contextual, &player, &mut rng).is_none()
        );
    }

    #[test]
    fn game_day_builder_names_the_opponent() {
        let slot = ScheduleSlot {
            position: 7,
            slot_type: SlotType::Championship,
            opponent: Some(String::from("Ironwood Wolves")),
            result: None,
        };
        let event = game_day_event(&slot);
        assert_eq!(event.title, "Championship Game");
        assert!(event.desc.contains("Ironwood Wolves"));
        assert!(event.choices[0].effects.plays_game);
    }
}
