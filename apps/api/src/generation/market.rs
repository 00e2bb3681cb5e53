//! Market insights: demand summary, top skills, salary range and adjacent roles
//! for a job title in a location. Needs no profile.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{MARKET_ANALYST_PERSONA, MARKET_PROMPT_TEMPLATE};
use crate::generation::schema::{check_count, require_text, text_list};
use crate::llm_client::prompts::{fill_template, system_prompt};
use crate::llm_client::{complete_json, CompletionBackend};

/// Top-N skills kept from the reply; extras are dropped.
const MAX_IN_DEMAND_SKILLS: usize = 5;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInsightsRequest {
    pub job_title: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InDemandSkill {
    pub skill: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryBenchmark {
    pub low: u64,
    pub high: u64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInsights {
    pub summary: String,
    pub in_demand_skills: Vec<InDemandSkill>,
    pub salary_benchmark: SalaryBenchmark,
    pub trending_roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarketReply {
    summary: String,
    in_demand_skills: Vec<InDemandSkill>,
    salary_benchmark: SalaryReply,
    trending_roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SalaryReply {
    low: f64,
    high: f64,
    currency: String,
}

pub async fn get_market_insights(
    request: &MarketInsightsRequest,
    llm: &dyn CompletionBackend,
) -> Result<MarketInsights, AppError> {
    let job_title = request.job_title.trim();
    let location = request.location.trim();
    if job_title.is_empty() || location.is_empty() {
        return Err(AppError::Validation(
            "jobTitle and location are both required".to_string(),
        ));
    }

    let prompt = fill_template(
        MARKET_PROMPT_TEMPLATE,
        &[("job_title", job_title), ("location", location)],
    );

    let reply: MarketReply = complete_json(llm, &prompt, &system_prompt(MARKET_ANALYST_PERSONA))
        .await
        .map_err(|e| AppError::GenerationFailed(format!("Market insights call failed: {e}")))?;

    let insights = validate_reply(reply).map_err(|e| {
        warn!("Market insights reply rejected: {e}");
        AppError::GenerationFailed(e)
    })?;

    info!(
        "Market insights for '{job_title}' in '{location}': {}-{} {}",
        insights.salary_benchmark.low,
        insights.salary_benchmark.high,
        insights.salary_benchmark.currency
    );
    Ok(insights)
}

fn validate_reply(reply: MarketReply) -> Result<MarketInsights, String> {
    let summary = require_text("summary", reply.summary)?;

    let mut in_demand_skills = reply
        .in_demand_skills
        .into_iter()
        .map(|s| {
            Ok(InDemandSkill {
                skill: require_text("inDemandSkills.skill", s.skill)?,
                reason: require_text("inDemandSkills.reason", s.reason)?,
            })
        })
        .collect::<Result<Vec<_>, String>>()?;
    check_count("inDemandSkills", in_demand_skills.len(), 1..=usize::MAX)?;
    if in_demand_skills.len() > MAX_IN_DEMAND_SKILLS {
        warn!(
            "Model returned {} in-demand skills, keeping the first {MAX_IN_DEMAND_SKILLS}",
            in_demand_skills.len()
        );
        in_demand_skills.truncate(MAX_IN_DEMAND_SKILLS);
    }

    let salary = reply.salary_benchmark;
    if !salary.low.is_finite() || !salary.high.is_finite() || salary.low < 0.0 {
        return Err("salaryBenchmark bounds must be non-negative numbers".to_string());
    }
    if salary.low > salary.high {
        return Err(format!(
            "salaryBenchmark low ({}) exceeds high ({})",
            salary.low, salary.high
        ));
    }
    let salary_benchmark = SalaryBenchmark {
        low: salary.low.round() as u64,
        high: salary.high.round() as u64,
        currency: require_text("salaryBenchmark.currency", salary.currency)?,
    };

    Ok(MarketInsights {
        summary,
        in_demand_skills,
        salary_benchmark,
        trending_roles: text_list("trendingRoles", reply.trending_roles, 1..=usize::MAX)?,
    })
}
