use crate::llm::{generate_structured, LLM};
use crate::models::{DetailVideoYouTube, RoteiroBiblico};
use crate::storage::ScriptStore;
use anyhow::{Context, Result};
use tracing::{debug, info};

const SYSTEM_PROMPT: &str = r##"Você é um especialista em marketing digital e SEO para YouTube, focado em conteúdo cristão e bíblico. Sua missão é criar informações otimizadas para vídeos a partir de roteiros bíblicos.

Diretrizes:
1) Títulos chamativos que gerem cliques sem enganar o público
2) Palavras-chave relevantes para SEO cristão
3) Emojis apropriados para engajamento
4) Foco no conteúdo bíblico e espiritual
5) Hashtags populares no nicho cristão
6) Descrições que incentivem inscrições e engajamento

Responda APENAS com um objeto JSON com os campos:
{
  "titulo": "título do vídeo",
  "descricao": "descrição completa",
  "tags": ["tag", "..."],
  "hashtags": ["#hashtag", "..."],
  "thumbnail_prompt": "prompt para gerar a thumbnail"
}"##;

/// Derives YouTube title, description, tags and thumbnail prompt from a script
pub struct VideoDetailGenerator {
    llm: Box<dyn LLM>,
    store: ScriptStore,
}

impl VideoDetailGenerator {
    pub fn new(llm: Box<dyn LLM>, store: ScriptStore) -> Self {
        Self { llm, store }
    }

    /// Generate the video details; they are stored only when `roteiro_id` is given
    pub async fn gerar_detail_video_youtube(
        &self,
        roteiro: &RoteiroBiblico,
        roteiro_id: Option<i64>,
    ) -> Result<DetailVideoYouTube> {
        info!("📺 Generating video details: tema='{}', tipo='{}'", roteiro.tema, roteiro.tipo);

        let prompt = build_prompt(roteiro);
        let detail: DetailVideoYouTube = generate_structured(self.llm.as_ref(), SYSTEM_PROMPT, &prompt)
            .await
            .context("Video detail generation failed")?;
        debug!("Generated video details: {:?}", detail);

        if let Some(roteiro_id) = roteiro_id {
            self.store.save_video_detail(&detail, roteiro_id).await?;
        }

        Ok(detail)
    }
}

pub fn build_prompt(roteiro: &RoteiroBiblico) -> String {
    format!(
        "Com base no seguinte roteiro bíblico, crie informações otimizadas para um vídeo do YouTube:\n\n\
         TEMA: {}\n\
         TIPO: {}\n\
         DURAÇÃO: {}\n\
         VERSÍCULOS: {}\n\n\
         ROTEIRO:\n{}\n\n\
         Crie:\n\
         1) Um título chamativo e otimizado para SEO\n\
         2) Uma descrição completa que incentive inscrições\n\
         3) Tags relevantes para o nicho cristão\n\
         4) Hashtags populares para redes sociais\n\
         5) Um prompt para gerar uma thumbnail atrativa\n\n\
         Foque em engajamento e conversão para inscritos no canal.",
        roteiro.tema,
        roteiro.tipo,
        roteiro.duracao_estimada,
        roteiro.versiculos_utilizados.join(", "),
        roteiro.roteiro
    )
}
