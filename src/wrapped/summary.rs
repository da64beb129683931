use crate::wrapped::*;

use serde_json::json;
use serde_json::Map as JSMap;

fn song_to_json(song: &SongStats) -> JSValue {
    json!({
        "name": song.name,
        "round": song.round,
        "votes": song.votes,
        "coverImage": song.cover_image,
    })
}

fn songs_to_json(songs: &[SongStats], limit: usize) -> Vec<JSValue> {
    songs.iter().take(limit).map(song_to_json).collect()
}

fn people_to_json(people: &[(String, i64)], limit: usize) -> Vec<JSValue> {
    people
        .iter()
        .take(limit)
        .map(|(name, total)| json!([name, total]))
        .collect()
}

fn member_to_json(m: &MemberStats, limit: Option<usize>) -> JSValue {
    let limit = limit.unwrap_or(usize::MAX);
    json!({
        "name": m.name,
        "avatar": m.avatar,
        "rank": m.rank,
        "netScore": m.net_score,
        "upvotes": m.upvotes,
        "downvotes": m.downvotes,
        "critics": people_to_json(&m.critics, limit),
        "fans": people_to_json(&m.fans, limit),
        "songs": songs_to_json(&m.songs, usize::MAX),
        "bestSongs": songs_to_json(&m.best_songs, limit),
        "worstSongs": songs_to_json(&m.worst_songs, limit),
    })
}

fn distinct_song_to_json(song: &DistinctSong) -> JSValue {
    json!({
        "songName": song.song_name,
        "artist": song.artist,
        "album": {"name": song.album.name, "cover": song.album.cover},
        "submitters": song.submitters,
    })
}

fn malformed_vote_to_json(mv: &MalformedVote) -> JSValue {
    json!({
        "round": mv.round,
        "submission": mv.submission,
        "respondent": mv.respondent,
        "votes": mv.raw,
    })
}

/// Assembles the final json.
pub fn build_summary_js(
    league: &League,
    stats: &LeagueStats,
    songs: Option<&[DistinctSong]>,
    settings: &RunSettings,
) -> WrappedResult<JSValue> {
    let selected: Vec<&MemberStats> = match settings.member.as_deref() {
        Some(name) => vec![stats.member(name).context(UnknownMemberSnafu { name })?],
        None => stats.members.iter().collect(),
    };

    let mut members: JSMap<String, JSValue> = JSMap::new();
    for m in selected {
        members.insert(m.name.clone(), member_to_json(m, settings.limit));
    }

    let malformed: Vec<JSValue> = stats
        .malformed_votes
        .iter()
        .map(malformed_vote_to_json)
        .collect();

    let mut res = json!({
        "league": {
            "memberCount": league.members.len(),
            "roundCount": league.rounds.len(),
            "malformedVotes": malformed,
        },
        "members": members,
    });
    if let Some(songs) = songs {
        let songs_js: Vec<JSValue> = songs.iter().map(distinct_song_to_json).collect();
        res["songs"] = JSValue::Array(songs_js);
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use league_stats::builder::Builder;

    fn league() -> League {
        let mut b = Builder::new();
        b.member("A", "a.png");
        b.member("B", "b.png");
        b.member("C", "c.png");
        b.round("1", "One");
        b.submit("A", "a1", "x").unwrap();
        b.respond("B", "2").unwrap();
        b.respond("C", "1").unwrap();
        b.submit("B", "b1", "x").unwrap();
        b.respond("A", "-1").unwrap();
        b.respond("C", "-3").unwrap();
        b.submit("C", "c1", "x").unwrap();
        b.respond("A", "?").unwrap();
        b.round("2", "Two");
        b.submit("A", "a2", "y").unwrap();
        b.respond("B", "-1").unwrap();
        b.build()
    }

    #[test]
    fn member_fields() {
        let league = league();
        let stats = run_league_stats(&league).unwrap();
        let js = build_summary_js(&league, &stats, None, &RunSettings::default()).unwrap();
        assert_eq!(js["league"]["memberCount"], json!(3));
        assert_eq!(js["league"]["roundCount"], json!(2));
        assert_eq!(
            js["league"]["malformedVotes"],
            json!([{"round": "1", "submission": 2, "respondent": "A", "votes": "?"}])
        );
        let a = &js["members"]["A"];
        assert_eq!(a["netScore"], json!(2));
        assert_eq!(a["rank"], json!(1));
        assert_eq!(a["avatar"], json!("a.png"));
        assert_eq!(a["fans"], json!([["B", 2], ["C", 1]]));
        assert_eq!(a["critics"], json!([["B", -1], ["C", 0]]));
        assert_eq!(
            a["bestSongs"][0],
            json!({"name": "a1", "round": "1", "votes": 3, "coverImage": ""})
        );
        assert_eq!(js["members"]["B"]["downvotes"], json!(-4));
        assert!(js.get("songs").is_none());
    }

    #[test]
    fn limit_and_member() {
        let league = league();
        let stats = run_league_stats(&league).unwrap();
        let settings = RunSettings {
            member: Some("A".to_string()),
            limit: Some(1),
            ..RunSettings::default()
        };
        let js = build_summary_js(&league, &stats, None, &settings).unwrap();
        let members = js["members"].as_object().unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(js["members"]["A"]["fans"], json!([["B", 2]]));
        assert_eq!(
            js["members"]["A"]["worstSongs"].as_array().unwrap().len(),
            1
        );
        assert_eq!(js["members"]["A"]["songs"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn unknown_member() {
        let league = league();
        let stats = run_league_stats(&league).unwrap();
        let settings = RunSettings {
            member: Some("Z".to_string()),
            ..RunSettings::default()
        };
        let res = build_summary_js(&league, &stats, None, &settings);
        assert!(matches!(res, Err(WrappedError::UnknownMember { .. })));
    }

    #[test]
    fn songs_are_listed() {
        let league = league();
        let stats = run_league_stats(&league).unwrap();
        let songs = distinct_songs(&league).unwrap();
        let js = build_summary_js(
            &league,
            &stats,
            Some(songs.as_slice()),
            &RunSettings::default(),
        )
        .unwrap();
        assert_eq!(js["songs"].as_array().unwrap().len(), 4);
        assert_eq!(js["songs"][0]["submitters"], json!(["A"]));
    }
}
