use crate::player_table::PlayerRecord;

/// Availability below this counts as an injury doubt.
pub const INJURY_CHANCE_CUTOFF: f64 = 0.66;
/// Orders strictly below this mark first and second choice takers.
pub const TAKER_ORDER_CUTOFF: i64 = 3;

/// Players flagged on these phrases are unavailable for club reasons, not
/// fitness, so they stay off the injury list.
const NEWS_DENYLIST: [&str; 2] = ["Season-long loan", "Recalled"];

#[derive(Debug, Clone, PartialEq)]
pub struct InjuryRow {
    pub player: String,
    pub team: String,
    pub chance_of_playing: f64,
    pub news: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TakerRow {
    pub player: String,
    pub team: String,
    pub order: i64,
}

pub fn injury_rows(players: &[PlayerRecord]) -> Vec<InjuryRow> {
    let mut rows = Vec::new();
    for player in players {
        let Some(chance) = player.chance_of_playing_this_round else {
            continue;
        };
        if chance >= INJURY_CHANCE_CUTOFF {
            continue;
        }
        if NEWS_DENYLIST
            .iter()
            .any(|needle| player.news.contains(needle))
        {
            continue;
        }
        rows.push(InjuryRow {
            player: player.name.clone(),
            team: player.team.clone(),
            chance_of_playing: chance,
            news: player.news.clone(),
        });
    }
    rows
}

pub fn penalty_taker_rows(players: &[PlayerRecord]) -> Vec<TakerRow> {
    taker_rows(players, |p| p.penalties_order)
}

pub fn set_piece_taker_rows(players: &[PlayerRecord]) -> Vec<TakerRow> {
    taker_rows(players, |p| p.corners_and_indirect_freekicks_order)
}

fn taker_rows(
    players: &[PlayerRecord],
    order_of: impl Fn(&PlayerRecord) -> Option<i64>,
) -> Vec<TakerRow> {
    let mut rows = Vec::new();
    for player in players {
        let Some(order) = order_of(player) else {
            continue;
        };
        if order >= TAKER_ORDER_CUTOFF {
            continue;
        }
        rows.push(TakerRow {
            player: player.name.clone(),
            team: player.team.clone(),
            order,
        });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str) -> PlayerRecord {
        PlayerRecord {
            name: name.to_string(),
            team: "Arsenal".to_string(),
            ..PlayerRecord::default()
        }
    }

    fn doubt(name: &str, chance: Option<f64>, news: &str) -> PlayerRecord {
        let mut p = player(name);
        p.chance_of_playing_this_round = chance;
        p.news = news.to_string();
        p
    }

    #[test]
    fn only_low_chances_make_the_injury_list() {
        let players = vec![
            doubt("A", Some(0.0), "Knee injury - expected back 01 Sep"),
            doubt("B", Some(0.5), "Knock - 50% chance of playing"),
            doubt("C", Some(0.75), "Minor knock"),
            doubt("D", None, ""),
        ];
        let rows = injury_rows(&players);
        let names: Vec<&str> = rows.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(rows[1].chance_of_playing, 0.5);
        assert_eq!(rows[1].news, "Knock - 50% chance of playing");
    }

    #[test]
    fn loan_and_recall_news_is_excluded() {
        let players = vec![
            doubt("A", Some(0.0), "Season-long loan to Ipswich"),
            doubt("B", Some(0.0), "Recalled by parent club"),
            doubt("C", Some(0.0), "Hamstring injury"),
        ];
        let rows = injury_rows(&players);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].player, "C");
    }

    #[test]
    fn first_and_second_choice_takers_only() {
        let mut a = player("A");
        a.penalties_order = Some(1);
        let mut b = player("B");
        b.penalties_order = Some(2);
        let mut c = player("C");
        c.penalties_order = Some(3);
        let d = player("D");

        let rows = penalty_taker_rows(&[a, b, c, d]);
        let names: Vec<&str> = rows.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(rows[0].order, 1);
    }

    #[test]
    fn set_piece_duty_uses_corner_order() {
        let mut a = player("A");
        a.corners_and_indirect_freekicks_order = Some(1);
        a.penalties_order = Some(5);
        let rows = set_piece_taker_rows(&[a]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].order, 1);
    }
}
