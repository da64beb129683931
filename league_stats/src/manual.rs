/*!

This is the long-form manual for `league_stats` and `mlwrapped`.

## Input format

`mlwrapped` reads the JSON document saved by the league extraction script:

```json
{
  "members": { "Anna": "https://example.com/anna.png", "Bob": "https://example.com/bob.png" },
  "rounds": {
    "round-id-1": {
      "number": "1",
      "name": "Songs from your childhood",
      "description": null,
      "info": [
        {
          "songName": "Yellow Submarine",
          "artist": "The Beatles",
          "album": { "name": "Revolver", "cover": "https://example.com/revolver.jpg" },
          "submitter": "Anna",
          "submitterComments": "",
          "responses": [ { "name": "Bob", "votes": "+2", "comment": null } ]
        }
      ]
    }
  }
}
```

The submissions of a round may also be given under the key `submissions`. The document may be
wrapped in an object keyed by league identifier, as the extraction script stores it; use
`--league` to pick one league when there are several.

Votes are read as integers, with an optional sign. An empty vote counts as zero. Any other text
also counts as zero, but it is reported in the `malformedVotes` section of the output and in the
logs, so that problems in the source data do not go unnoticed.

A submission without a submitter, or a vote without the name of the voter, stops the processing.

## Statistics

For every member who submitted at least one song:

* `netScore`: all the votes received, `upvotes` + `downvotes`
* `upvotes`, `downvotes`: sums of the positive and negative votes received
* `critics`, `fans`: every other submitter with the sum of the negative (resp. positive) votes
  they gave, most significant first. A member who never voted negatively still appears in the
  critics with a total of 0.
* `songs`, `bestSongs`, `worstSongs`: the songs with their net votes, in submission order and
  sorted by votes. Ties keep the submission order.
* `rank`: the competition rank by net score. Tied members share a rank and the next rank is
  skipped accordingly: scores `10, 10, 5, 1` get ranks `1, 1, 3, 4`.

## Usage

```bash
mlwrapped -i season-3.json -o season-3-wrapped.json --songs --limit 5
```

Options can also be set in a JSON configuration file passed with `--config`:

```json
{ "input": "season-3.json", "output": "season-3-wrapped.json", "limit": 5, "includeSongs": true }
```

Relative paths in the configuration file are resolved against the directory of that file.
Command line options take precedence over the configuration file.

With `--reference`, the output is compared with a previously computed summary and the program
fails if they differ.

*/
