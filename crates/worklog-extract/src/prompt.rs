//! Fixed request pieces: the system instruction, the output schema, and the
//! `generateContent` body built from them.

use serde_json::{Value, json};

/// Instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "\
You turn a free-text summary of a working day into structured work-log entries.
Identify every distinct task in the text and return one object per task with:
- project_category: the project, product area or category the task belongs to.
- accomplishment: what was done, as a short past-tense statement.
- key_insight: the outcome, lesson or result of the task. If the text gives none, \
infer a brief one from context, or write \"N/A\" if nothing can be inferred.
Use only information from the text. Do not invent tasks. Return an empty array if \
the text describes no work.";

/// Output schema: an array of objects with three required strings.
#[must_use]
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "project_category": { "type": "STRING" },
                "accomplishment": { "type": "STRING" },
                "key_insight": { "type": "STRING" }
            },
            "required": ["project_category", "accomplishment", "key_insight"],
            "propertyOrdering": ["project_category", "accomplishment", "key_insight"]
        }
    })
}

/// Body for `models/{model}:generateContent`.
#[must_use]
pub fn request_body(text: &str, temperature: f32) -> Value {
    json!({
        "systemInstruction": {
            "parts": [{ "text": SYSTEM_INSTRUCTION }]
        },
        "contents": [{
            "role": "user",
            "parts": [{ "text": text }]
        }],
        "generationConfig": {
            "temperature": temperature,
            "responseMimeType": "application/json",
            "responseSchema": response_schema()
        }
    })
}
