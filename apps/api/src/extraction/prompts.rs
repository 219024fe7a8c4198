// Extraction prompt templates.
//
// The key lists below are a fixed contract: the eligibility scorer, the
// persistence layer, and API consumers all depend on these exact names.
// Do not rename a key without migrating every consumer.

/// System prompt for structured extraction — enforces JSON-only output.
pub const EXTRACT_SYSTEM: &str = "You are a precise assistant that extracts \
    structured information from grant documents and project proposals. \
    You MUST respond with a single valid JSON object. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Grant extraction prompt. Replace `{text}` before sending.
pub const GRANT_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract structured grant information from the following grant page content.

[START GRANT TEXT]
{text}
[END GRANT TEXT]

Return a JSON object with exactly these keys:
- grant_name: The full name of the grant.
- grant_description: A 2-4 sentence summary of what the grant is about, including its purpose and target outcomes.
- timeline_condition: Any restrictions or expectations regarding project duration or start/end dates.
- eligible_applicants: Who can apply (e.g., individuals, nonprofits, students, citizen groups).
- budget_policy: Any rules or caps on funding, such as maximum amount or funding structure.
- key_directions: A list of strategic priorities or themes the grant supports (e.g., elderly care, digital inclusion).
- expenses_allowed: Types of expenses that are covered (e.g., logistics, materials, venue rental).
- expenses_disallowed: Types of expenses that are NOT covered (e.g., staff salaries, overseas travel).
- selection_criteria: The evaluation or selection criteria used to decide on successful applications.
- supporting_documents_required: A list of application documents or information the applicant needs to submit.

Be as detailed and accurate as possible. If a field is not found in the text, return an empty string or empty array for that key. Respond only with the JSON object."#;

/// Project extraction prompt. Replace `{text}` before sending.
pub const PROJECT_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract structured data from the following project proposal submitted for community grant funding.

[START PROJECT TEXT]
{text}
[END PROJECT TEXT]

Return a JSON object with exactly these keys:
- project_name: The title of the project.
- project_description: A short summary (2-4 sentences) of what the project aims to do.
- timeline: The intended duration or dates of the project.
- budget: The estimated total cost or requested budget.
- key_objectives: A list of the project's main objectives or planned activities.
- key_directions: A list of strategic themes or goals this project aligns with (e.g. digital literacy, pandemic support, elderly outreach).
- target_beneficiaries: Groups or individuals that the project benefits (e.g., seniors in rental flats).
- volunteer_roles: What kinds of roles and responsibilities volunteers will have.
- partnerships: Any partner organizations or collaborators mentioned.
- justification: The reason this project was proposed; the background problem or community need.
- evaluation_methods: Metrics or methods used to track the project's success.

If information is not found, return an empty string or empty array for that key. Respond only with the JSON object."#;
