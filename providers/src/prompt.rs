//! Instructions and output schema sent with every generation request.

use serde_json::{Value, json};
use soulbar_types::NonEmptyString;

use crate::DraftDescription;

pub const SYSTEM_INSTRUCTION: &str = "\
You are the bartender at the \"Soul Bar\". You are an art therapist and a mixologist.
Your goal is to interpret emotions into cocktail metaphors.
Be empathetic, poetic, and soothing.
Your output must be strictly valid JSON.";

/// Field names of the structured reply, in the order the model should emit them.
pub const RESPONSE_FIELDS: [&str; 5] = [
    "name",
    "color",
    "ingredients",
    "analysis",
    "positivityScore",
];

/// Gemini `responseSchema` requiring every field of the reply.
#[must_use]
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "color": { "type": "STRING", "description": "Hex color code such as #1e3a8a" },
            "ingredients": { "type": "ARRAY", "items": { "type": "STRING" } },
            "analysis": { "type": "STRING" },
            "positivityScore": { "type": "NUMBER" }
        },
        "required": RESPONSE_FIELDS,
        "propertyOrdering": RESPONSE_FIELDS,
    })
}

#[must_use]
pub fn text_prompt(text: &NonEmptyString) -> String {
    format!(
        "The user has entrusted these emotions to you: \"{}\".

Create a conceptual cocktail for them.
1. Determine the 'color' of their emotion as a hex code.
2. Give the cocktail a creative 'name'.
3. List 3-4 metaphorical or real 'ingredients' (e.g. \"2oz Tears of Joy\", \"Dash of Bitters\", \"Vodka\").
4. Write an empathetic 'analysis' (max 2 sentences) explaining why this drink fits their mood.
5. Assign a 'positivityScore' from 0 (very sad or angry) to 100 (ecstatic) based on the input.",
        text.as_str().trim()
    )
}

#[must_use]
pub fn draft_prompt(draft: &DraftDescription) -> String {
    let garnishes = if draft.accents.is_empty() {
        "none".to_string()
    } else {
        draft.accents.join(", ")
    };
    format!(
        "The user manually crafted a drink.
Base Liquid: {name} ({color}).
Garnishes: {garnishes}.

Interpret their aesthetic choices psychologically.
1. Keep the hex 'color' provided: {color}.
2. Give the creation a 'name' based on the visual combination.
3. List the 'ingredients' based on the base and garnishes.
4. Write an 'analysis' (max 2 sentences) of what their choices say about their subconscious state (e.g. choosing fiery red means release).
5. Estimate a 'positivityScore' (0-100) based on the vibrancy and garnishes.",
        name = draft.base_name,
        color = draft.base_color,
    )
}

#[cfg(test)]
mod tests {
    use soulbar_types::{HexColor, NonEmptyString};

    use super::{RESPONSE_FIELDS, draft_prompt, response_schema, text_prompt};
    use crate::DraftDescription;

    #[test]
    fn schema_requires_every_field() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, RESPONSE_FIELDS);
        for field in RESPONSE_FIELDS {
            assert!(schema["properties"].get(field).is_some(), "{field} missing");
        }
        assert_eq!(schema["properties"]["ingredients"]["type"], "ARRAY");
    }

    #[test]
    fn text_prompt_quotes_the_feelings() {
        let text = NonEmptyString::new("  I feel exhausted but hopeful ").unwrap();
        let prompt = text_prompt(&text);
        assert!(prompt.contains("\"I feel exhausted but hopeful\""));
        assert!(prompt.contains("positivityScore"));
    }

    #[test]
    fn draft_prompt_keeps_the_base_color() {
        let draft = DraftDescription {
            base_name: "Fiery Red".to_string(),
            base_color: HexColor::from_rgb(0xb9, 0x1c, 0x1c),
            accents: vec!["Rosemary".to_string(), "Gold Leaf".to_string()],
        };
        let prompt = draft_prompt(&draft);
        assert!(prompt.contains("Base Liquid: Fiery Red (#b91c1c)."));
        assert!(prompt.contains("Garnishes: Rosemary, Gold Leaf."));
        assert!(prompt.contains("Keep the hex 'color' provided: #b91c1c."));
    }

    #[test]
    fn draft_prompt_without_accents_says_none() {
        let draft = DraftDescription {
            base_name: "Deep Blue".to_string(),
            base_color: HexColor::from_rgb(0x1e, 0x3a, 0x8a),
            accents: Vec::new(),
        };
        assert!(draft_prompt(&draft).contains("Garnishes: none."));
    }
}
