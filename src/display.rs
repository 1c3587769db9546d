use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::schedule::types::{GenderRule, Match, Participant, PlayerRef, Round};
use crate::schedule::{court_label, games_per_participant};

fn rule_label(rule: GenderRule) -> &'static str {
    match rule {
        GenderRule::Any => "",
        GenderRule::MaleOnly => " (men)",
        GenderRule::FemaleOnly => " (women)",
    }
}

fn team_names(team: &[PlayerRef; 2]) -> String {
    format!("{} / {}", team[0].name, team[1].name)
}

fn team_score(team: &[PlayerRef; 2], participants: &[Participant]) -> f64 {
    team.iter()
        .filter_map(|p| participants.iter().find(|q| q.id == p.id))
        .map(Participant::skill_score)
        .sum()
}

/// One line per match: "[A] Kim / Lee vs Park / Choi (women)"
pub fn format_match(m: &Match) -> String {
    format!(
        "[{}] {} vs {}{}",
        court_label(m.court_id),
        team_names(&m.team1),
        team_names(&m.team2),
        rule_label(m.rule)
    )
}

fn resting_line(round: &Round) -> String {
    let names: Vec<&str> = round.resting.iter().map(|p| p.name.as_str()).collect();
    names.join(", ")
}

/// Writes the schedule as plain text, one round per block
pub fn write_schedule_to_file<P: AsRef<Path>>(rounds: &[Round], path: P) -> std::io::Result<()> {
    let mut file = File::create(path)?;

    for round in rounds {
        writeln!(file, "** Round {} - {} **", round.round, round.time)?;
        if round.matches.is_empty() {
            writeln!(file, "[NO MATCHES]")?;
        }
        for m in &round.matches {
            writeln!(file, "{}", format_match(m))?;
        }
        if !round.resting.is_empty() {
            writeln!(file, "rest: {}", resting_line(round))?;
        }
        writeln!(file)?;
    }

    Ok(())
}

/// Prints the schedule with team skill sums and a games-per-player tally
pub fn print_schedule(rounds: &[Round], participants: &[Participant]) {
    println!("\n=== Match Schedule ===");
    println!(
        "Rounds: {}, matches: {}",
        rounds.len(),
        rounds.iter().map(|r| r.matches.len()).sum::<usize>()
    );

    for round in rounds {
        println!("\nRound {} ({})", round.round, round.time);
        if round.matches.is_empty() {
            println!("  [NO MATCHES]");
        }
        for m in &round.matches {
            println!(
                "  {}  [{} vs {}]",
                format_match(m),
                team_score(&m.team1, participants),
                team_score(&m.team2, participants)
            );
        }
        if !round.resting.is_empty() {
            println!("  Resting: {}", resting_line(round));
        }
    }

    let games = games_per_participant(rounds);
    println!("\nGames per player:");
    for p in participants {
        let played = games.get(&p.id).copied().unwrap_or(0);
        if p.is_excluded() {
            println!("  {} - not playing", p.name);
        } else {
            println!("  {} - {}/{}", p.name, played, p.quota);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_ref(name: &str) -> PlayerRef {
        PlayerRef { id: name.to_lowercase(), name: name.to_string() }
    }

    #[test]
    fn test_format_match() {
        let m = Match {
            court_id: 2,
            rule: GenderRule::FemaleOnly,
            team1: [player_ref("Kim"), player_ref("Lee")],
            team2: [player_ref("Park"), player_ref("Choi")],
        };
        assert_eq!(format_match(&m), "[B] Kim / Lee vs Park / Choi (women)");
    }

    #[test]
    fn test_write_schedule_to_file() {
        let rounds = vec![Round {
            round: 1,
            time: "20:00".to_string(),
            matches: vec![Match {
                court_id: 1,
                rule: GenderRule::Any,
                team1: [player_ref("Kim"), player_ref("Lee")],
                team2: [player_ref("Park"), player_ref("Choi")],
            }],
            resting: vec![player_ref("Jung")],
        }];
        let path = std::env::temp_dir().join(format!("doubles-rotation-{}.txt", std::process::id()));
        write_schedule_to_file(&rounds, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(text, "** Round 1 - 20:00 **\n[A] Kim / Lee vs Park / Choi\nrest: Jung\n\n");
    }
}
