// Reading the league document written by the extraction script.

use crate::wrapped::*;

use serde::{Deserialize, Serialize};
use serde_json::Map as JSMap;
use std::collections::BTreeMap;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct AlbumDocument {
    pub name: String,
    pub cover: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ResponseDocument {
    pub name: Option<String>,
    // A string in the scraped documents, but numbers are accepted too.
    pub votes: Option<JSValue>,
    pub comment: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionDocument {
    #[serde(rename = "songName")]
    pub song_name: String,
    pub artist: String,
    pub album: AlbumDocument,
    pub submitter: Option<String>,
    #[serde(rename = "submitterComments", alias = "comments")]
    pub comments: Option<String>,
    #[serde(default)]
    pub responses: Vec<ResponseDocument>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RoundDocument {
    pub number: Option<JSValue>,
    pub name: Option<String>,
    pub description: Option<String>,
    // The extraction script stores the submissions under "info".
    #[serde(alias = "info", default)]
    pub submissions: Vec<SubmissionDocument>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct LeagueDocument {
    #[serde(default)]
    pub members: BTreeMap<String, String>,
    // Kept as a raw map to preserve the order of the rounds.
    pub rounds: JSMap<String, JSValue>,
}

/// Reads a league from a file.
///
/// The document is either a league, or an object of leagues keyed by identifier.
pub fn read_league(path: &str, league_id: Option<&str>) -> WrappedResult<League> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    let doc = select_league(js, league_id)?;
    to_league(doc)
}

pub fn select_league(js: JSValue, league_id: Option<&str>) -> WrappedResult<LeagueDocument> {
    let mut obj = match js {
        JSValue::Object(obj) => obj,
        x => whatever!("The league document must be a JSON object, found {}", x),
    };
    if obj.contains_key("rounds") {
        if let Some(lid) = league_id {
            warn!(
                "select_league: the document holds a single league, ignoring league {:?}",
                lid
            );
        }
        return serde_json::from_value(JSValue::Object(obj)).context(ParsingJsonSnafu {});
    }
    let league_js = match league_id {
        Some(lid) => obj.remove(lid).context(UnknownLeagueSnafu { league: lid })?,
        None if obj.len() == 1 => {
            let (lid, league_js) = obj
                .into_iter()
                .next()
                .context(UnknownLeagueSnafu { league: "" })?;
            info!("Using league {:?}", lid);
            league_js
        }
        None => {
            let leagues: Vec<String> = obj.keys().cloned().collect();
            return AmbiguousLeagueSnafu {
                leagues: leagues.join(", "),
            }
            .fail();
        }
    };
    serde_json::from_value(league_js).context(ParsingJsonSnafu {})
}

/// Turns the document into the structures of the statistics library.
///
/// Missing submitters and voters are left for the library to report.
pub fn to_league(doc: LeagueDocument) -> WrappedResult<League> {
    let members: Vec<Member> = doc
        .members
        .into_iter()
        .map(|(name, avatar)| Member { name, avatar })
        .collect();

    let mut rounds: Vec<Round> = Vec::new();
    for (round_id, round_js) in doc.rounds.into_iter() {
        let rd: RoundDocument = serde_json::from_value(round_js).context(ParsingJsonSnafu {})?;
        let number = match rd.number {
            Some(JSValue::String(s)) => s,
            Some(JSValue::Number(n)) => n.to_string(),
            _ => {
                warn!("to_league: round {:?} has no number", round_id);
                round_id.clone()
            }
        };
        debug!(
            "to_league: round {:?} number {} with {} submissions",
            round_id,
            number,
            rd.submissions.len()
        );
        let submissions: Vec<Submission> = rd
            .submissions
            .into_iter()
            .map(|sd| Submission {
                song_name: sd.song_name,
                artist: sd.artist,
                album: Album {
                    name: sd.album.name,
                    cover: sd.album.cover,
                },
                submitter: sd.submitter,
                comments: sd.comments.unwrap_or_default(),
                responses: sd
                    .responses
                    .into_iter()
                    .map(|r| Response {
                        name: r.name,
                        votes: votes_text(&r.votes),
                        comment: r.comment,
                    })
                    .collect(),
            })
            .collect();
        rounds.push(Round {
            id: round_id,
            number,
            name: rd.name.unwrap_or_default(),
            description: rd.description,
            submissions,
        });
    }
    info!("Read {} members, {} rounds", members.len(), rounds.len());
    Ok(League { members, rounds })
}

fn votes_text(votes: &Option<JSValue>) -> String {
    match votes {
        None | Some(JSValue::Null) => "".to_string(),
        Some(JSValue::String(s)) => s.clone(),
        Some(JSValue::Number(n)) => n.to_string(),
        // Left for the library to report as malformed.
        Some(x) => x.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn round_js() -> JSValue {
        json!({
            "number": "1",
            "name": "Openers",
            "description": null,
            "info": [{
                "songName": "Yellow",
                "artist": "Coldplay",
                "album": {"name": "Parachutes", "cover": "p.jpg"},
                "submitter": "Anna",
                "submitterComments": "",
                "responses": [
                    {"name": "Bob", "votes": "+2", "comment": null},
                    {"name": "Cleo", "votes": -1},
                    {"name": "Dan"}
                ]
            }]
        })
    }

    #[test]
    fn reads_a_single_league() {
        let js = json!({
            "members": {"Anna": "a.png"},
            "rounds": {
                "r2": round_js(),
                "r1": {"number": 2, "submissions": []},
                "r0": {"name": "Unnumbered"}
            }
        });
        let league = to_league(select_league(js, None).unwrap()).unwrap();
        assert_eq!(league.members.len(), 1);
        // Document order, not key order.
        assert_eq!(league.rounds[0].id, "r2");
        assert_eq!(league.rounds[1].number, "2");
        // A round without a number is known by its key.
        assert_eq!(league.rounds[2].number, "r0");
        assert_eq!(league.rounds[2].name, "Unnumbered");
        let votes: Vec<&str> = league.rounds[0].submissions[0]
            .responses
            .iter()
            .map(|r| r.votes.as_str())
            .collect();
        assert_eq!(votes, vec!["+2", "-1", ""]);
        assert_eq!(league.rounds[0].submissions[0].album.cover, "p.jpg");
    }

    #[test]
    fn picks_the_league() {
        let js = json!({
            "s1": {"members": {}, "rounds": {}},
            "s2": {"members": {"Bob": "b.png"}, "rounds": {"x": round_js()}}
        });
        assert!(matches!(
            select_league(js.clone(), None),
            Err(WrappedError::AmbiguousLeague { .. })
        ));
        assert!(matches!(
            select_league(js.clone(), Some("s3")),
            Err(WrappedError::UnknownLeague { .. })
        ));
        let doc = select_league(js, Some("s2")).unwrap();
        assert_eq!(doc.rounds.len(), 1);
    }

    #[test]
    fn single_wrapped_league() {
        let js = json!({"league-id": {"members": {}, "rounds": {"x": round_js()}}});
        let doc = select_league(js, None).unwrap();
        assert_eq!(doc.rounds.len(), 1);
    }

    #[test]
    fn missing_submitter_is_kept_for_the_library() {
        let mut r = round_js();
        r["info"][0].as_object_mut().unwrap().remove("submitter");
        let js = json!({"members": {}, "rounds": {"x": r}});
        let league = to_league(select_league(js, None).unwrap()).unwrap();
        assert_eq!(league.rounds[0].submissions[0].submitter, None);
        assert_eq!(
            run_league_stats(&league),
            Err(StatsErrors::MissingSubmitter {
                round: "1".to_string(),
                submission: 0
            })
        );
    }
}
