/*!

This is the long-form manual for `winner_draw` and `raffle`.

## Drawing winners

Winners can be drawn out of a plain number of participants or out of a list of participants.

With a number of participants, the winners are reported as positions:

```bash
raffle --participants 250 --winners 3
```

```text
Winner #1: Participant number 17
Winner #2: Participant number 102
Winner #3: Participant number 240
```

With a list, every winner is reported with its line number in the list and the content of that line:

```bash
raffle --input participants.csv --winners 2
```

When both are given and the list contains at least one participant, the list is used.

## Input format

The list is a plain text file with one participant per line. Blank lines are ignored and there is
no header row: every non-blank line is a participant.

A line may contain several fields, separated by one of `,` `;` `|` or a tab. The separator is
guessed for every line independently: the one that cuts the line into the most fields is used,
and in case of a tie the first one in the order `,` `;` tab `|` wins. A line without any of these
separators is a participant with a single field.

Fields can be quoted with `"`. A quoted field may contain separators, and a doubled `""` inside a
quoted field stands for a single quote character.

```text
Anna Schmidt;anna@example.org;Berlin
"Doe, John";john@example.org;Hamburg
Clara|clara@example.org|Munich
```

## Configuration

The program accepts a configuration file in JSON with the `--config` flag. Options given on the
command line take precedence over the configuration file.

```json
{
  "winnerCount": 3,
  "participantFile": "participants.csv",
  "outputFile": "winners.json"
}
```

- `winnerCount` (number or string): the number of winners to draw.
- `participantCount` (number or string, optional): the number of participants, when no list is used.
- `participantFile` (string, optional): the list of participants, relative to the directory of the
  configuration file.
- `outputFile` (string, optional): where to write the outcome in JSON, or `stdout`.

## Output

With `--out`, the outcome of the draw is written in JSON:

```json
{
  "errors": [],
  "winners": [
    { "label": "Participant #2", "value": "Doe, John | john@example.org | Hamburg" }
  ],
  "participants": [
    ["Anna Schmidt", "anna@example.org", "Berlin"],
    ["Doe, John", "john@example.org", "Hamburg"],
    ["Clara", "clara@example.org", "Munich"]
  ]
}
```

When the input is not valid, `errors` lists every problem found and no winner is drawn.

 */
