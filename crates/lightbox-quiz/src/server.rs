use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::info;

use quiz_core::mcp_api::{
    ArchetypeDetailResponse, ArchetypeListResponse, ArchetypeSummary, DetermineArchetypeParams,
    DetermineArchetypeResponse, GetArchetypeParams, ListArchetypesParams, QuestionListResponse,
    QuizStepParams, QuizStepResponse, RelatedArchetypesParams, RelatedArchetypesResponse,
};
use quiz_core::{Answers, Catalog, Category, Chapter, QuizAction, Resolver};

#[derive(Clone)]
pub struct LightboxQuizServer {
    catalog: Arc<Catalog>,
    tool_router: ToolRouter<LightboxQuizServer>,
}

impl LightboxQuizServer {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            tool_router: Self::tool_router(),
        }
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.catalog)
    }
}

#[tool_router]
impl LightboxQuizServer {
    #[tool(description = "List the three quiz questions with their answer options and categories.")]
    async fn list_questions(&self) -> Result<Json<QuestionListResponse>, String> {
        Ok(Json(QuestionListResponse {
            questions: self.catalog.questions().to_vec(),
        }))
    }

    #[tool(description = "Get a lightbox archetype by slug (e.g. 'gzhel', 'khokhloma').")]
    async fn get_archetype(
        &self,
        Parameters(params): Parameters<GetArchetypeParams>,
    ) -> Result<Json<ArchetypeDetailResponse>, String> {
        let slug = params.slug.trim().to_ascii_lowercase();
        if slug.is_empty() {
            return Err("slug must not be empty".to_string());
        }

        let archetype = self
            .catalog
            .archetype(&slug)
            .ok_or_else(|| format!("archetype not found: {slug}"))?;

        Ok(Json(ArchetypeDetailResponse {
            archetype: archetype.clone(),
        }))
    }

    #[tool(description = "List lightbox archetypes in catalog order, optionally filtered by chapter ('I', 'II', 'III').")]
    async fn list_archetypes(
        &self,
        Parameters(params): Parameters<ListArchetypesParams>,
    ) -> Result<Json<ArchetypeListResponse>, String> {
        let chapter = params
            .chapter
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| c.parse::<Chapter>())
            .transpose()
            .map_err(|e| e.to_string())?;

        let archetypes: Vec<ArchetypeSummary> = match chapter {
            Some(chapter) => self
                .catalog
                .by_chapter(chapter)
                .into_iter()
                .map(ArchetypeSummary::from)
                .collect(),
            None => self
                .catalog
                .archetypes()
                .iter()
                .map(ArchetypeSummary::from)
                .collect(),
        };

        Ok(Json(ArchetypeListResponse {
            chapter,
            archetypes,
        }))
    }

    #[tool(description = "Recommend an archetype from quiz answers. Each answer is a category: 'warm', 'cool' or 'earth'. Missing answers return the default archetype with 'fallback' confidence.")]
    async fn determine_archetype(
        &self,
        Parameters(params): Parameters<DetermineArchetypeParams>,
    ) -> Result<Json<DetermineArchetypeResponse>, String> {
        let answers = Answers {
            question1: parse_category(params.question1.as_deref())?,
            question2: parse_category(params.question2.as_deref())?,
            question3: parse_category(params.question3.as_deref())?,
        };

        let resolver = self.resolver();
        let complete = resolver.is_complete(&answers);
        let result = resolver.determine(&answers);
        info!(
            slug = %result.archetype.slug,
            confidence = %result.confidence,
            complete,
            "archetype determined"
        );

        Ok(Json(DetermineArchetypeResponse::from_result(result, complete)))
    }

    #[tool(description = "List up to three archetypes related to the given slug, same chapter first.")]
    async fn related_archetypes(
        &self,
        Parameters(params): Parameters<RelatedArchetypesParams>,
    ) -> Result<Json<RelatedArchetypesResponse>, String> {
        let slug = params.slug.trim().to_ascii_lowercase();
        let related = self
            .resolver()
            .related(&slug)
            .into_iter()
            .map(ArchetypeSummary::from)
            .collect();

        Ok(Json(RelatedArchetypesResponse { slug, related }))
    }

    #[tool(description = "Advance a quiz session by one action ('start', 'answer' with a category, 'back', 'reset'). Pass back the returned session on the next call.")]
    async fn quiz_step(
        &self,
        Parameters(params): Parameters<QuizStepParams>,
    ) -> Result<Json<QuizStepResponse>, String> {
        let action = parse_action(&params.action, params.category.as_deref())?;
        let session = params.session.unwrap_or_default().apply(action, &self.resolver());

        let question = session.current_question(&self.catalog).cloned();
        let result = session
            .is_finished()
            .then_some(session.result_slug.as_deref())
            .flatten()
            .and_then(|slug| self.catalog.archetype(slug))
            .map(ArchetypeSummary::from);

        Ok(Json(QuizStepResponse {
            step: session.step,
            session,
            question,
            result,
        }))
    }
}

fn parse_category(raw: Option<&str>) -> Result<Option<Category>, String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Category>())
        .transpose()
        .map_err(|e| e.to_string())
}

fn parse_action(action: &str, category: Option<&str>) -> Result<QuizAction, String> {
    match action.trim().to_ascii_lowercase().as_str() {
        "start" => Ok(QuizAction::Start),
        "back" => Ok(QuizAction::Back),
        "reset" => Ok(QuizAction::Reset),
        "answer" => parse_category(category)?
            .map(|category| QuizAction::Answer { category })
            .ok_or_else(|| "the 'answer' action requires a category".to_string()),
        other => Err(format!(
            "unknown action: '{other}'. Available actions: start, answer, back, reset"
        )),
    }
}

#[tool_handler]
impl ServerHandler for LightboxQuizServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "lightbox-quiz".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Рамка Света archetype quiz server. Use list_questions to show the quiz, \
                 determine_archetype to score answers (warm, cool, earth), quiz_step to drive \
                 the quiz one action at a time, get_archetype and list_archetypes for catalog \
                 lookup, and related_archetypes for alternatives."
                    .to_string(),
            ),
        }
    }
}
