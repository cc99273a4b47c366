use std::future::Future;
use std::path::{Path, PathBuf};

use crate::error::{Result, RosterError};
use crate::models::{MemberRecord, MemberStatus, RegistrationIndex};
use crate::store::RecordStore;

pub const REGISTRATIONS_FILE: &str = "registrations.json";

/// Supplies a complete roster. The viewer stays unusable until this resolves.
pub trait RosterSource {
    fn load(&self) -> impl Future<Output = Result<RecordStore>> + Send;
}

/// Reads every `*.json` / `*.csv` member file in a directory, in file-name
/// order, plus `registrations.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    data_dir: PathBuf,
    default_category: String,
}

impl DirectorySource {
    pub fn new(data_dir: impl Into<PathBuf>, default_category: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            default_category: default_category.into(),
        }
    }

    async fn member_files(&self) -> Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(&self.data_dir)
            .await
            .map_err(|err| RosterError::data_load(&self.data_dir, err))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| RosterError::data_load(&self.data_dir, err))?
        {
            let path = entry.path();
            if path.file_name().and_then(|name| name.to_str()) == Some(REGISTRATIONS_FILE) {
                continue;
            }
            if matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("json") | Some("csv")
            ) {
                files.push(path);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(RosterError::data_load(&self.data_dir, "no member files found"));
        }
        Ok(files)
    }

    async fn read_members(&self) -> Result<Vec<MemberRecord>> {
        let mut records = Vec::new();
        for path in self.member_files().await? {
            let mut batch = read_member_file(&path).await?;
            tracing::debug!(path = %path.display(), count = batch.len(), "member file read");
            for record in &mut batch {
                if record.category.as_deref().map_or(true, str::is_empty) {
                    record.category = Some(self.default_category.clone());
                }
            }
            records.append(&mut batch);
        }
        Ok(records)
    }

    async fn read_registrations(&self) -> Result<RegistrationIndex> {
        let path = self.data_dir.join(REGISTRATIONS_FILE);
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|err| RosterError::data_load(&path, err))?;
        serde_json::from_str(&contents).map_err(|err| RosterError::data_load(&path, err))
    }
}

impl RosterSource for DirectorySource {
    async fn load(&self) -> Result<RecordStore> {
        tracing::info!(data_dir = %self.data_dir.display(), "loading roster");
        let (records, registrations) =
            tokio::try_join!(self.read_members(), self.read_registrations())?;
        RecordStore::new(records, registrations)
    }
}

async fn read_member_file(path: &Path) -> Result<Vec<MemberRecord>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| RosterError::data_load(path, err))?;

    if path.extension().and_then(|ext| ext.to_str()) == Some("csv") {
        let mut reader = csv::Reader::from_reader(contents.as_bytes());
        reader
            .deserialize::<MemberRecord>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|err| RosterError::data_load(path, err))
    } else {
        serde_json::from_str(&contents).map_err(|err| RosterError::data_load(path, err))
    }
}

/// Two-member demo roster with matching registration IDs.
pub fn sample_roster() -> (Vec<MemberRecord>, RegistrationIndex) {
    let records = vec![
        MemberRecord {
            id: "O01".to_string(),
            name: "Reno ade Putra".to_string(),
            level: Some("VIP".to_string()),
            status: MemberStatus::Active,
            group: "OKTO88".to_string(),
            join_date: Some("2025-01-10".to_string()),
            category: Some("MI088".to_string()),
        },
        MemberRecord {
            id: "M01".to_string(),
            name: "Deasy Fathira".to_string(),
            level: Some("VIP".to_string()),
            status: MemberStatus::Active,
            group: "MIO88".to_string(),
            join_date: Some("2025-06-25".to_string()),
            category: Some("MI088".to_string()),
        },
    ];
    let registrations = [
        (
            "O01".to_string(),
            vec!["ID8891".to_string(), "ID8892".to_string(), "ID8893".to_string()],
        ),
        ("M01".to_string(), vec!["ID7721".to_string(), "ID7722".to_string()]),
    ]
    .into_iter()
    .collect();

    (records, registrations)
}

/// Writes the demo roster as one member file per group plus the registration index.
pub async fn write_sample(dir: &Path) -> Result<usize> {
    tokio::fs::create_dir_all(dir).await?;
    let (records, registrations) = sample_roster();

    let mut groups: Vec<&str> = records.iter().map(|record| record.group.as_str()).collect();
    groups.sort_unstable();
    groups.dedup();

    for group in &groups {
        let members: Vec<&MemberRecord> = records
            .iter()
            .filter(|record| record.group == *group)
            .collect();
        let path = dir.join(format!("members-{}.json", group.to_lowercase()));
        tokio::fs::write(&path, serde_json::to_string_pretty(&members)?).await?;
    }
    tokio::fs::write(
        dir.join(REGISTRATIONS_FILE),
        serde_json::to_string_pretty(&registrations)?,
    )
    .await?;

    Ok(records.len())
}
