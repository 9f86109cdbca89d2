use crate::models::{DetailVideoYouTube, RoteiroBiblico};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::path::Path;
use tracing::{debug, info};

const CREATE_ROTEIROS: &str = r#"
    CREATE TABLE IF NOT EXISTS roteiros_biblicos
    (
        id                    INTEGER PRIMARY KEY AUTOINCREMENT,
        tema                  TEXT,
        data_criacao          TEXT,
        roteiro               TEXT,
        versiculos_utilizados TEXT,
        duracao_estimada      TEXT,
        tipo                  TEXT,
        referencias           TEXT,
        postagem_comunidade   TEXT
    )
"#;

const CREATE_INFO_VIDEOS: &str = r#"
    CREATE TABLE IF NOT EXISTS info_videos_youtube
    (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        roteiro_id       INTEGER,
        titulo           TEXT,
        descricao        TEXT,
        tags             TEXT,
        hashtags         TEXT,
        thumbnail_prompt TEXT,
        FOREIGN KEY (roteiro_id) REFERENCES roteiros_biblicos (id)
    )
"#;

/// Separator for tags and hashtags in `info_videos_youtube`
const LIST_SEPARATOR: &str = ", ";

/// A script read back together with its row id
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRoteiro {
    pub id: i64,
    pub roteiro: RoteiroBiblico,
}

/// SQLite store for scripts and their video details
#[derive(Clone)]
pub struct ScriptStore {
    pool: SqlitePool,
}

impl ScriptStore {
    /// Open (or create) the database file and make sure both tables exist
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("Cannot open SQLite database {}", path.display()))?;

        let store = Self { pool };
        store.init_schema().await?;
        info!("🗄️ SQLite store ready at {}", path.display());
        Ok(store)
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(CREATE_ROTEIROS).execute(&self.pool).await?;
        sqlx::query(CREATE_INFO_VIDEOS).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert a script and return its new id. Lists are stored as JSON arrays.
    pub async fn save_roteiro(&self, roteiro: &RoteiroBiblico) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO roteiros_biblicos (tema, data_criacao, roteiro, versiculos_utilizados,
                                           duracao_estimada, tipo, referencias, postagem_comunidade)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&roteiro.tema)
        .bind(roteiro.data_criacao.to_rfc3339())
        .bind(&roteiro.roteiro)
        .bind(serde_json::to_string(&roteiro.versiculos_utilizados)?)
        .bind(&roteiro.duracao_estimada)
        .bind(roteiro.tipo.as_str())
        .bind(serde_json::to_string(&roteiro.referencias)?)
        .bind(&roteiro.postagem_comunidade)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!("✅ Script saved to SQLite with id {}", id);
        Ok(id)
    }

    /// Insert video details linked to an existing script
    pub async fn save_video_detail(&self, detail: &DetailVideoYouTube, roteiro_id: i64) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO info_videos_youtube (roteiro_id, titulo, descricao, tags, hashtags, thumbnail_prompt)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(roteiro_id)
        .bind(&detail.titulo)
        .bind(&detail.descricao)
        .bind(detail.tags.join(LIST_SEPARATOR))
        .bind(detail.hashtags.join(LIST_SEPARATOR))
        .bind(&detail.thumbnail_prompt)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Cannot save video details for script {}", roteiro_id))?;

        let id = result.last_insert_rowid();
        info!("✅ Video details saved for roteiro_id {}", roteiro_id);
        Ok(id)
    }

    pub async fn get_roteiro(&self, id: i64) -> Result<Option<StoredRoteiro>> {
        let row = sqlx::query(
            r#"
            SELECT id, tema, data_criacao, roteiro, versiculos_utilizados, duracao_estimada,
                   tipo, referencias, postagem_comunidade
            FROM roteiros_biblicos
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| roteiro_from_row(&row)).transpose()
    }

    /// Video details for a script, oldest first.
    ///
    /// Tags and hashtags are stored joined with `", "`, so an entry that itself
    /// contains `", "` comes back split in two.
    pub async fn video_details_for(&self, roteiro_id: i64) -> Result<Vec<DetailVideoYouTube>> {
        let rows = sqlx::query(
            r#"
            SELECT titulo, descricao, tags, hashtags, thumbnail_prompt
            FROM info_videos_youtube
            WHERE roteiro_id = ?
            ORDER BY id
            "#,
        )
        .bind(roteiro_id)
        .fetch_all(&self.pool)
        .await?;

        debug!("{} video detail rows for roteiro_id {}", rows.len(), roteiro_id);

        let details = rows
            .iter()
            .map(|row| DetailVideoYouTube {
                titulo: row.get("titulo"),
                descricao: row.get("descricao"),
                tags: split_list(row.get("tags")),
                hashtags: split_list(row.get("hashtags")),
                thumbnail_prompt: row.get("thumbnail_prompt"),
            })
            .collect();

        Ok(details)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn roteiro_from_row(row: &SqliteRow) -> Result<StoredRoteiro> {
    let data_criacao: String = row.get("data_criacao");
    let data_criacao = DateTime::parse_from_rfc3339(&data_criacao)
        .with_context(|| format!("Invalid data_criacao '{}'", data_criacao))?
        .with_timezone(&Local);

    let versiculos: String = row.get("versiculos_utilizados");
    let referencias: String = row.get("referencias");
    let tipo: String = row.get("tipo");

    Ok(StoredRoteiro {
        id: row.get("id"),
        roteiro: RoteiroBiblico {
            tema: row.get("tema"),
            data_criacao,
            roteiro: row.get("roteiro"),
            versiculos_utilizados: serde_json::from_str(&versiculos)?,
            duracao_estimada: row.get("duracao_estimada"),
            tipo: tipo.parse()?,
            referencias: serde_json::from_str(&referencias)?,
            postagem_comunidade: row.get("postagem_comunidade"),
        },
    })
}

fn split_list(joined: String) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(LIST_SEPARATOR).map(str::to_string).collect()
}
