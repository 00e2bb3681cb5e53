// All LLM prompt constants for the generator contracts.
// Reuses cross-cutting fragments from llm_client::prompts.

pub const RESUME_WRITER_PERSONA: &str = "You are a professional resume writer.";

/// Resume text generation. Replace: {profile}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Please create a compelling and professional resume based on the following information:

{profile}

Return a JSON object with this EXACT schema:
{
  "resume": "The full resume as readable plain text, with section headings"
}

RULES:
1. Use ONLY the facts provided above. Do not invent employers, dates, degrees or metrics.
2. Lead experience bullets with strong action verbs.
3. Omit any section marked N/A."#;

pub const SCORER_PERSONA: &str =
    "You are a world-class career coach and resume expert.";

/// Resume scoring. Replace: {desired_roles}, {profile}
pub const SCORE_PROMPT_TEMPLATE: &str = r#"Analyze the provided resume data and give it a score from 0 to 100. You must also provide specific, actionable feedback on how to improve it.

Scoring Criteria:
- Clarity and Conciseness: Is the information easy to read and understand?
- Impact and Action Verbs: Does the experience section use strong action verbs and quantify achievements?
- Relevance: Is the information relevant to the desired job roles (if provided)?
- Completeness: Are all key sections (Experience, Education, Skills) well-filled?
- Skills Section: Does the skills section list relevant and valuable skills?

DESIRED JOB ROLES: {desired_roles}

{profile}

Return a JSON object with this EXACT schema:
{
  "score": 72,
  "feedback": ["Quantify the impact of the caching work, e.g. latency or cost saved"]
}

`score` is a whole number from 0 to 100. `feedback` holds at least one constructive, specific point."#;

pub const SKILL_ADVISOR_PERSONA: &str = "You are a career advisor who specializes in identifying \
    skill gaps and suggesting skills to develop for career advancement.";

/// Skill-gap suggestion. Replace: {desired_roles}, {profile}
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Based on the user's profile and desired job roles, provide a list of skills that the user should develop to improve their career prospects. Also provide the reasoning behind the suggestions.

USER PROFILE:
{profile}

DESIRED JOB ROLES: {desired_roles}

Return a JSON object with this EXACT schema:
{
  "suggestedSkills": ["Kubernetes", "System design"],
  "reasoning": "Why these skills close the gap between the profile and the desired roles"
}

Do NOT suggest skills the user already lists."#;

pub const COVER_LETTER_PERSONA: &str =
    "You are an expert career coach and professional writer.";

/// Cover letter. Replace: {tone}, {job_title}, {profile}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a compelling, personalized cover letter for a job application.

TONE: {tone}
JOB TITLE: {job_title}

Base the cover letter on the following resume information:

{profile}

Instructions:
1. Start with a strong opening that grabs the reader's attention and clearly states the position being applied for.
2. Highlight 2-3 of the most relevant experiences or projects from the resume that align with the job title.
3. Weave in key skills naturally throughout the body of the letter.
4. Maintain the specified '{tone}' tone throughout the letter.
5. End with a strong closing statement that reiterates interest and includes a call to action.
6. Keep it concise and tailored to the job title. Do not invent a company name to apply to.

Return a JSON object with this EXACT schema:
{
  "coverLetter": "The full cover letter text"
}"#;

pub const MARKET_ANALYST_PERSONA: &str =
    "You are a world-class career analyst and market research expert.";

/// Market insights. Replace: {job_title}, {location}
pub const MARKET_PROMPT_TEMPLATE: &str = r#"Provide detailed market insights for a specific job role and location.

JOB TITLE: {job_title}
LOCATION: {location}

Provide:
1. summary: a brief, insightful overview of the job market for this role in this location.
2. inDemandSkills: the top 5 most critical skills, each with a short reason why it matters.
3. salaryBenchmark: an estimated annual salary range (low and high) in the local currency.
4. trendingRoles: 3-4 related or emerging job titles worth considering.

Return a JSON object with this EXACT schema:
{
  "summary": "Demand for backend engineers in Berlin remains strong...",
  "inDemandSkills": [{"skill": "Go", "reason": "Dominant in cloud-native infrastructure"}],
  "salaryBenchmark": {"low": 60000, "high": 95000, "currency": "EUR"},
  "trendingRoles": ["Platform Engineer", "Site Reliability Engineer"]
}

Be realistic and grounded in your training data. Do not invent wildly inaccurate figures."#;

pub const CAREER_STRATEGIST_PERSONA: &str = "You are an expert career strategist and mentor \
    for technology and business professionals.";

/// Career path roadmap. Replace: {desired_roles}, {experience}, {skills}, {education}
pub const CAREER_PATH_PROMPT_TEMPLATE: &str = r#"Analyze the user's resume and desired career goals to create a realistic, actionable and inspiring career roadmap.

DESIRED CAREER GOALS: {desired_roles}

CURRENT PROFILE:
- Experience: {experience}
- Skills: {skills}
- Education: {education}

Instructions:
1. Analyze the gap between the current profile and the stated goals.
2. Construct a path of 3 to 4 distinct, sequential roles, starting from a reasonable next step and progressing towards the goal.
3. For each step give a job title, an estimated duration (e.g. "1-2 years"), a summary of why the role matters, and the skills to develop in it.
4. Write an encouraging overall summary connecting the present to the goal.

Return a JSON object with this EXACT schema:
{
  "roadmap": [
    {
      "title": "Senior Backend Engineer",
      "duration": "1-2 years",
      "summary": "Own larger services end to end...",
      "skillsToDevelop": ["Distributed systems", "Mentoring"]
    }
  ],
  "overallSummary": "A high-level summary of the trajectory"
}"#;
