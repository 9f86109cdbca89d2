use anyhow::Result;
use async_trait::async_trait;
use roteiro_biblico::bible::VerseSource;
use roteiro_biblico::llm::{ChatMessage, LLMResponse};
use roteiro_biblico::{
    BibleError, BibleLookupTool, BookRegistry, JsonArchive, LLMProvider, LookupResponse,
    ScriptGenerator, ScriptStore, TipoRoteiro, VideoDetailGenerator, LLM,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio_test::assert_ok;

const ROMANS_5: &str = r#"
<html><body><article>
  <p>
    <span class="v">1</span><span class="t">Agora que fomos aceitos por Deus pela nossa fé nele,</span>
    <span class="t">temos paz com ele por meio do nosso Senhor Jesus Cristo.</span>
    <span class="v">2</span><span class="t">Foi Cristo quem nos deu, por meio da nossa fé, esta vida na graça de Deus.</span>
    <span class="v">3</span><span class="t">E também nos alegramos nos sofrimentos,</span>
    <span class="v">4</span><span class="t">pois sabemos que os sofrimentos produzem a paciência.</span>
    <span class="v">5</span><span class="t">Essa esperança não nos deixa decepcionados.</span>
  </p>
</article></body></html>
"#;

/// Serves canned chapter pages keyed by `translation/book/chapter`
#[derive(Default)]
struct FakeBibliaOnline {
    pages: HashMap<String, String>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeBibliaOnline {
    fn with_page(mut self, key: &str, html: &str) -> Self {
        self.pages.insert(key.to_string(), html.to_string());
        self
    }
}

#[async_trait]
impl VerseSource for FakeBibliaOnline {
    async fn fetch_chapter(&self, translation: &str, book_key: &str, chapter: &str) -> Result<String, BibleError> {
        let key = format!("{}/{}/{}", translation, book_key, chapter);
        self.requests.lock().unwrap().push(key.clone());
        self.pages
            .get(&key)
            .cloned()
            .ok_or_else(|| BibleError::SourceUnavailable(format!("404 Not Found for {}", key)))
    }
}

/// Returns queued replies in order and records every prompt it receives
struct ScriptedLLM {
    replies: Mutex<Vec<String>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedLLM {
    fn new(reply: &str) -> (Box<dyn LLM>, Arc<Mutex<Vec<String>>>) {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let llm = ScriptedLLM {
            replies: Mutex::new(vec![reply.to_string()]),
            prompts: prompts.clone(),
        };
        (Box::new(llm), prompts)
    }
}

#[async_trait]
impl LLM for ScriptedLLM {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<LLMResponse> {
        let user = messages.last().map(|m| m.content.clone()).unwrap_or_default();
        self.prompts.lock().unwrap().push(user);

        let content = self
            .replies
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| anyhow::anyhow!("no scripted reply left"))?;
        Ok(LLMResponse {
            content,
            tokens_used: Some(321),
        })
    }

    async fn is_available(&self) -> bool {
        true
    }

    fn provider_type(&self) -> LLMProvider {
        LLMProvider::LMStudio
    }
}

fn lookup_tool(source: FakeBibliaOnline) -> BibleLookupTool {
    BibleLookupTool::new(Box::new(source), BookRegistry::portuguese())
}

#[tokio::test]
async fn test_lookup_range_end_to_end() {
    let source = FakeBibliaOnline::default().with_page("ntlh/rm/5", ROMANS_5);
    let requests = source.requests.clone();
    let tool = lookup_tool(source);

    let result = tool.lookup_verse("rm 5:3-5", None).await.into_result().unwrap();
    assert_eq!(result.reference, "Romanos 5:3-5 (NTLH)");
    assert_eq!(result.verses.iter().map(|v| v.number).collect::<Vec<_>>(), vec![3, 4, 5]);
    assert_eq!(
        result.text,
        "E também nos alegramos nos sofrimentos, pois sabemos que os sofrimentos produzem a paciência. Essa esperança não nos deixa decepcionados."
    );
    assert_eq!(*requests.lock().unwrap(), vec!["ntlh/rm/5".to_string()]);
}

#[tokio::test]
async fn test_lookup_whole_chapter_and_reversed_range() {
    let source = FakeBibliaOnline::default().with_page("ntlh/rm/5", ROMANS_5);
    let tool = lookup_tool(source);

    let chapter = tool.try_lookup("RM 5", None).await.unwrap();
    assert_eq!(chapter.reference, "Romanos 5 (NTLH)");
    assert_eq!(chapter.verses.len(), 5);
    assert!(chapter.verses[0].text.ends_with("nosso Senhor Jesus Cristo."));

    let reversed = tool.try_lookup("rm5:4-2", None).await.unwrap();
    let forward = tool.try_lookup("rm5:2-4", None).await.unwrap();
    assert_eq!(reversed.verses, forward.verses);
    assert_eq!(reversed.reference, "Romanos 5:2-4 (NTLH)");
}

#[tokio::test]
async fn test_lookup_failures_are_reported_as_error_objects() {
    let source = FakeBibliaOnline::default().with_page("ntlh/rm/5", ROMANS_5);
    let requests = source.requests.clone();
    let tool = lookup_tool(source);

    let missing_chapter = tool.lookup_verse("jo3:99", None).await;
    assert!(missing_chapter.error().unwrap().to_lowercase().contains("erro"));

    let out_of_range = tool.lookup_verse("rm5:999", None).await;
    assert!(out_of_range.error().unwrap().contains("não encontrado"));

    let invalid = tool.lookup_verse("rm$5:3", None).await;
    assert!(invalid.error().unwrap().to_lowercase().contains("formato inválido"));

    // Only the two well-formed references reached the source
    assert_eq!(requests.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unregistered_book_uses_upper_case_key() {
    let source = FakeBibliaOnline::default().with_page("ntlh/xy/1", ROMANS_5);
    let tool = lookup_tool(source);

    let result = tool.try_lookup("xy1:1", None).await.unwrap();
    assert_eq!(result.reference, "XY 1:1 (NTLH)");
}

#[tokio::test]
async fn test_tool_call_round_trip() {
    let source = FakeBibliaOnline::default().with_page("ntlh/rm/5", ROMANS_5);
    let tool = lookup_tool(source);

    let value = tool.call_tool(r#"{"referencia": "rm 5:1", "translation": "ntlh"}"#).await;
    let response: LookupResponse = serde_json::from_value(value).unwrap();
    let result = response.into_result().unwrap();
    assert_eq!(result.verses.len(), 1);
    assert_eq!(result.verses[0].number, 1);
}

#[tokio::test]
async fn test_generate_script_and_video_details() {
    let temp_dir = TempDir::new().unwrap();
    let source = FakeBibliaOnline::default().with_page("ntlh/rm/5", ROMANS_5);
    let lookup = Arc::new(lookup_tool(source));

    let store = ScriptStore::connect(temp_dir.path().join("roteiros.sqlite3")).await.unwrap();
    let archive = JsonArchive::new(temp_dir.path().join("roteiros_json"));

    let (script_llm, script_prompts) = ScriptedLLM::new(
        r#"```json
{
  "tema": "esperança",
  "roteiro": "Romanos 5:3-5\nE também nos alegramos nos sofrimentos...",
  "versiculos_utilizados": ["Romanos 5:3-5"],
  "duracao_estimada": "≤60 segundos",
  "postagem_comunidade": "🙏 Novo short sobre esperança!"
}
```"#,
    );
    let (video_llm, _) = ScriptedLLM::new(
        r##"{
  "titulo": "Esperança que não decepciona ✨",
  "descricao": "Uma leitura de Romanos 5. Inscreva-se!",
  "tags": ["esperança", "bíblia", "romanos"],
  "hashtags": ["#esperança", "#bíblia"],
  "thumbnail_prompt": "Nascer do sol sobre montanhas com uma Bíblia aberta"
}"##,
    );

    let script_generator = ScriptGenerator::new(script_llm, lookup, archive, store.clone());
    let video_generator = VideoDetailGenerator::new(video_llm, store.clone());

    let referencias = vec!["rm 5:3-5".to_string(), "Salmo 23".to_string()];
    let (roteiro, roteiro_id) = assert_ok!(
        script_generator
            .gerar_roteiro("Esperança nas provações", TipoRoteiro::Short, &referencias)
            .await
    );

    assert_eq!(roteiro_id, 1);
    assert_eq!(roteiro.tema, "Esperança nas provações");
    assert_eq!(roteiro.tipo, TipoRoteiro::Short);
    assert_eq!(roteiro.referencias, referencias);

    // Verified verse text was handed to the model; the unparseable suggestion was skipped
    let prompt = script_prompts.lock().unwrap()[0].clone();
    assert!(prompt.contains("Romanos 5:3-5 (NTLH)\nE também nos alegramos nos sofrimentos,"));
    assert!(prompt.contains("rm 5:3-5, Salmo 23"));

    let json_files: Vec<_> = std::fs::read_dir(temp_dir.path().join("roteiros_json"))
        .unwrap()
        .collect();
    assert_eq!(json_files.len(), 1);

    let info_video = assert_ok!(
        video_generator
            .gerar_detail_video_youtube(&roteiro, Some(roteiro_id))
            .await
    );
    assert_eq!(info_video.tags.len(), 3);

    let stored = store.get_roteiro(roteiro_id).await.unwrap().unwrap();
    assert_eq!(stored.roteiro.tema, "Esperança nas provações");
    assert_eq!(stored.roteiro.versiculos_utilizados, vec!["Romanos 5:3-5".to_string()]);
    assert_eq!(store.video_details_for(roteiro_id).await.unwrap(), vec![info_video]);
}

#[tokio::test]
async fn test_video_details_without_id_are_not_stored() {
    let temp_dir = TempDir::new().unwrap();
    let store = ScriptStore::connect(temp_dir.path().join("roteiros.sqlite3")).await.unwrap();

    let (video_llm, prompts) = ScriptedLLM::new(
        r#"{"titulo": "t", "descricao": "d", "tags": [], "hashtags": [], "thumbnail_prompt": "p"}"#,
    );
    let generator = VideoDetailGenerator::new(video_llm, store.clone());

    let roteiro = roteiro_biblico::RoteiroBiblico {
        tema: "Gratidão".to_string(),
        data_criacao: chrono::Local::now(),
        roteiro: "1 Tessalonicenses 5:18".to_string(),
        versiculos_utilizados: vec!["1 Tessalonicenses 5:18".to_string()],
        duracao_estimada: "≤60 segundos".to_string(),
        tipo: TipoRoteiro::Short,
        referencias: Vec::new(),
        postagem_comunidade: String::new(),
    };

    let detail = generator.gerar_detail_video_youtube(&roteiro, None).await.unwrap();
    assert_eq!(detail.titulo, "t");
    assert!(prompts.lock().unwrap()[0].contains("TEMA: Gratidão"));
    assert!(store.video_details_for(1).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_model_reply_fails_without_persisting() {
    let temp_dir = TempDir::new().unwrap();
    let source = FakeBibliaOnline::default();
    let store = ScriptStore::connect(temp_dir.path().join("roteiros.sqlite3")).await.unwrap();
    let archive = JsonArchive::new(temp_dir.path().join("roteiros_json"));

    let (llm, _) = ScriptedLLM::new("Desculpe, não posso ajudar.");
    let generator = ScriptGenerator::new(llm, Arc::new(lookup_tool(source)), archive, store.clone());

    let result = generator.gerar_roteiro("paz", TipoRoteiro::Longo, &[]).await;
    assert!(result.is_err());
    assert!(store.get_roteiro(1).await.unwrap().is_none());
    assert!(!temp_dir.path().join("roteiros_json").exists());
}
