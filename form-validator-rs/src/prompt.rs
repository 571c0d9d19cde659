/// Instruction placed in front of every form definition sent to the model
pub const SYSTEM_INSTRUCTION: &str = "You are an expert in web form design, validation and accessibility.
Analyze the form definition below and respond with STRICT JSON only.

The JSON object must contain exactly these four keys, each an array of strings:
- \"validationRules\": validation rules each field should enforce
- \"accessibility\": accessibility issues and improvements
- \"uxSuggestions\": user experience improvements
- \"edgeCases\": edge cases and unusual inputs the form must handle

Do not wrap the JSON in markdown code fences.
Do not add any explanation or prose before or after the JSON.

Form definition:
";

/// Full instruction: the fixed preamble followed by the caller's raw form text
pub fn build_instruction(form_definition: &str) -> String {
    let mut instruction = String::with_capacity(SYSTEM_INSTRUCTION.len() + form_definition.len());
    instruction.push_str(SYSTEM_INSTRUCTION);
    instruction.push_str(form_definition);
    instruction
}
