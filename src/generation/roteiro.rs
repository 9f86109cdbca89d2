use crate::bible::{BibleLookupTool, LookupResponse, LookupResult};
use crate::llm::{generate_structured, LLM};
use crate::models::{RoteiroBiblico, TipoRoteiro};
use crate::storage::{JsonArchive, ScriptStore};
use anyhow::{Context, Result};
use chrono::Local;
use std::sync::Arc;
use tracing::{debug, info, warn};

const SYSTEM_PROMPT: &str = r#"Você é um especialista em pesquisa bíblica com profundo conhecimento das escrituras. Sua missão é reunir versículos bíblicos relevantes para um tema e montar o roteiro de um vídeo do YouTube.

Diretrizes:
1) Selecione versículos que abordem diretamente o tema e formem uma narrativa coesa, sem interpretações forçadas ou fora de contexto.
2) Agrupe versículos relacionados em blocos e mantenha versículos consecutivos unidos no formato "Livro X:Y-Z".
3) Apresente apenas o texto bíblico, com linguagem respeitosa e reverente, sem misturar traduções.
4) Vídeos longos: 6-10 blocos de versículos (600-900 palavras). Shorts: 2-3 blocos (150-220 palavras).
5) Termine com um convite respeitoso para inscrição no canal, em tom pastoral e acolhedor.

Responda APENAS com um objeto JSON com os campos:
{
  "tema": "tema central",
  "roteiro": "texto integral do roteiro",
  "versiculos_utilizados": ["Livro Capítulo:Versículo", "..."],
  "duracao_estimada": "ex.: 4-7 minutos ou ≤60 segundos",
  "postagem_comunidade": "texto curto para a aba Comunidade do YouTube chamando para o vídeo"
}"#;

/// Generates scripts and stores them as JSON and in SQLite
pub struct ScriptGenerator {
    llm: Box<dyn LLM>,
    lookup: Arc<BibleLookupTool>,
    archive: JsonArchive,
    store: ScriptStore,
}

impl ScriptGenerator {
    pub fn new(llm: Box<dyn LLM>, lookup: Arc<BibleLookupTool>, archive: JsonArchive, store: ScriptStore) -> Self {
        Self {
            llm,
            lookup,
            archive,
            store,
        }
    }

    /// Generate a script on `tema`, returning it with its database id
    pub async fn gerar_roteiro(
        &self,
        tema: &str,
        tipo: TipoRoteiro,
        referencias: &[String],
    ) -> Result<(RoteiroBiblico, i64)> {
        info!("🚀 Generating script: tema='{}', tipo='{}', referencias={:?}", tema, tipo, referencias);

        let verified = self.verify_references(referencias).await;
        let prompt = build_prompt(tema, tipo, referencias, &verified);

        let mut roteiro: RoteiroBiblico = generate_structured(self.llm.as_ref(), SYSTEM_PROMPT, &prompt)
            .await
            .context("Script generation failed")?;
        roteiro.tema = tema.to_string();
        roteiro.tipo = tipo;
        roteiro.referencias = referencias.to_vec();
        debug!("Generated script: {:?}", roteiro);

        let path = self.archive.save(&roteiro).await?;
        roteiro.data_criacao = Local::now();
        let roteiro_id = self.store.save_roteiro(&roteiro).await?;

        info!("🎉 Script saved to {} and SQLite with id {}", path.display(), roteiro_id);
        Ok((roteiro, roteiro_id))
    }

    /// Fetch the suggested references; ones that fail are logged and skipped
    async fn verify_references(&self, referencias: &[String]) -> Vec<LookupResult> {
        let mut verified = Vec::new();
        for referencia in referencias {
            match self.lookup.lookup_verse(referencia, None).await {
                LookupResponse::Found(result) => verified.push(result),
                LookupResponse::Failed { error } => {
                    warn!("Skipping suggested reference '{}': {}", referencia, error);
                }
            }
        }
        verified
    }
}

/// User prompt for one script
pub fn build_prompt(tema: &str, tipo: TipoRoteiro, referencias: &[String], verified: &[LookupResult]) -> String {
    let mut prompt = format!(
        "Gere um roteiro {} sobre o tema '{}' seguindo estas diretrizes:\n\n",
        tipo, tema
    );

    prompt.push_str(
        "FORMATO DO ROTEIRO:\n\
         - Para vídeos longos: 700-1000 palavras (4-7 min)\n\
         - Para shorts: 150-220 palavras (≤60 s)\n\n\
         REGRAS ESTRITAS:\n\
         - Apresente APENAS os versículos bíblicos, sem NENHUM texto adicional\n\
         - NÃO inclua introduções, explicações, interpretações ou comentários\n\
         - NÃO adicione transições ou textos conectivos entre os versículos\n\
         - NÃO inclua reflexões ou conclusões\n\n\
         FORMATAÇÃO:\n\
         - Apresente cada versículo no formato 'Livro Capítulo:Versículo(s)'\n\
         - Para versículos consecutivos, use o formato 'Livro Capítulo:Versículo-Versículo'\n\
         - Mantenha versículos consecutivos unidos em um único bloco\n\
         - Separe blocos diferentes apenas com uma linha em branco\n\n\
         ESTRUTURA:\n\
         - Comece cada bloco com a referência bíblica\n\
         - Apresente o texto do versículo logo após a referência\n\n\
         EXEMPLO DE FORMATO:\n\
         João 3:16\n\
         [texto do versículo]\n\n\
         Salmos 23:1-3\n\
         [texto dos versículos unidos]\n\n",
    );

    prompt.push_str(&format!("DURAÇÃO ALVO: {}\n\n", tipo.duracao_alvo()));

    prompt.push_str("REFERÊNCIAS SUGERIDAS:\n");
    if referencias.is_empty() {
        prompt.push_str("- Use as referências mais adequadas ao tema\n");
    } else {
        prompt.push_str(&format!(
            "Considere utilizar as seguintes referências bíblicas: {}.\n",
            referencias.join(", ")
        ));
    }

    if !verified.is_empty() {
        prompt.push_str("\nTEXTO VERIFICADO (use exatamente este texto para estas referências):\n");
        for result in verified {
            prompt.push_str(&format!("{}\n{}\n\n", result.reference, result.text));
        }
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bible::Verse;

    #[test]
    fn test_prompt_without_references() {
        let prompt = build_prompt("perdão", TipoRoteiro::Short, &[], &[]);
        assert!(prompt.starts_with("Gere um roteiro Short sobre o tema 'perdão'"));
        assert!(prompt.contains("Use as referências mais adequadas ao tema"));
        assert!(prompt.contains("≤60 segundos"));
        assert!(!prompt.contains("TEXTO VERIFICADO"));
    }

    #[test]
    fn test_prompt_with_verified_references() {
        let verified = vec![LookupResult::new(
            "João 3:16 (NTLH)".to_string(),
            vec![Verse { number: 16, text: "Porque Deus amou o mundo".to_string() }],
        )];
        let referencias = vec!["jo3:16".to_string(), "sl23".to_string()];

        let prompt = build_prompt("amor", TipoRoteiro::Longo, &referencias, &verified);
        assert!(prompt.contains("Gere um roteiro Video"));
        assert!(prompt.contains("jo3:16, sl23"));
        assert!(prompt.contains("João 3:16 (NTLH)\nPorque Deus amou o mundo"));
    }
}
