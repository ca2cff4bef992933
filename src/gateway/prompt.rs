//! Prompt construction for batch calls.

/// System instruction shared by every batch call.
pub const SYSTEM: &str = "You are an expert in Luxembourgish language and culture. \
Analyze and translate the provided sayings, splitting each into two semantic parts. \
Also assess cultural popularity, word difficulty, and vulgarity.";

const RULES: &str = "Important: Part1 of each saying should be enough for the quiz player to be able to guess Part2, \
but try not to have just one word as part 2 (i.e. it should be quite semantically balanced). \
Also, for each saying, the combination of lu_part1 and lu_part2 must exactly match the original saying. \
Do not modify the original text. Return the results in the requested JSON format.";

const EXAMPLE_RECORD: &str = r#"{
  "lu_part1": "Wann d'Aarbecht ee räich méich,",
  "lu_part2": "da wier den Iesel méi räich wéi de Mëller.",
  "en_literal_translation_p1": "If the work makes one rich,",
  "en_literal_translation_p2": "then the donkey would be richer than the miller.",
  "en_closest_real_corresponding_saying_p1": "If hard work led to success,",
  "en_closest_real_corresponding_saying_p2": "the donkey would own the farm.",
  "culturalPopularity": 3,
  "wordsDifficulty": 3,
  "vulgarity": 1
}"#;

/// Build the user prompt for `sayings`, numbered from 1.
///
/// `extra` is appended verbatim after the rules.
pub fn user_prompt(sayings: &[String], extra: Option<&str>) -> String {
    let listing = sayings
        .iter()
        .enumerate()
        .map(|(i, saying)| format!("{}. \"{}\"", i + 1, saying))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Analyze and translate the following Luxembourgish sayings:\n{listing}\n\n{RULES}\n{extra}\n\nExample record:\n```json\n{EXAMPLE_RECORD}\n```\n",
        extra = extra.unwrap_or_default(),
    )
}
