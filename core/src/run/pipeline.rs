use crate::adapters::model::ModelClient;
use crate::audit::report::Reporter;
use crate::audit::responses::ResponseArchive;
use crate::config::GeneratorConfig;
use crate::error::{CoreError, CoreResult};
use crate::materialize::containment::resolve_path;
use crate::materialize::writer::{FileMaterializer, WriteResult};
use crate::payload::model::GenerationPayload;
use crate::payload::summary::{summarize_files, GenerationSummary};
use crate::response::parse_model_response;
use crate::run::uid::{generate_uid, is_valid_uid};
use crate::snapshot::copy::copy_template_to;
use std::fs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Nothing was copied or written; `paths` lists what would have been.
    DryRun { uid: String, paths: Vec<String> },
    Generated {
        summary: GenerationSummary,
        result: WriteResult,
    },
}

impl GenerationOutcome {
    pub fn uid(&self) -> &str {
        match self {
            GenerationOutcome::DryRun { uid, .. } => uid,
            GenerationOutcome::Generated { summary, .. } => &summary.uid,
        }
    }
}

/// One request, end to end: model text in, project directory out.
pub struct AppGenerator {
    config: GeneratorConfig,
}

impl AppGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn generate(
        &self,
        client: &dyn ModelClient,
        reporter: &mut dyn Reporter,
    ) -> CoreResult<GenerationOutcome> {
        self.generate_with_uid(&generate_uid(), client, reporter)
    }

    /// Like [`generate`](Self::generate) with a caller-chosen uid. The caller
    /// must not reuse a uid: an existing output directory is wiped.
    pub fn generate_with_uid(
        &self,
        uid: &str,
        client: &dyn ModelClient,
        reporter: &mut dyn Reporter,
    ) -> CoreResult<GenerationOutcome> {
        self.config.validate()?;
        if !is_valid_uid(uid) {
            return Err(CoreError::InvalidInput(format!("malformed uid: {}", uid)));
        }

        let template_dir = resolve_path(&self.config.template_dir)?;
        fs::create_dir_all(&self.config.out_root)?;
        let target_dir = resolve_path(&self.config.out_root)?.join(uid);
        reporter.info(&format!("Template: {}", template_dir.display()));
        reporter.info(&format!("Target: {}", target_dir.display()));

        let raw = client.generate(self.config.effective_prompt(), &self.config.model)?;
        let data = match parse_model_response(&raw) {
            Ok(v) => v,
            Err(e) => {
                reporter.error(&format!("Model response (raw):\n{}", raw));
                return Err(e);
            }
        };

        // The archive is for later inspection only; a failure here is not fatal.
        match ResponseArchive::new(&self.config.responses_dir).save(uid, &data) {
            Ok(path) => reporter.info(&format!("Saved raw response: {}", path.display())),
            Err(e) => reporter.warn(&format!("Could not archive response: {}", e)),
        }

        let payload = GenerationPayload::from_value(&data)?;
        if payload.is_empty() {
            reporter.warn("Model response lists no files.");
        }

        if self.config.dry_run {
            reporter.info(&format!("Would write {} files", payload.len()));
            let paths: Vec<String> = payload.entries().flatten().map(|e| e.path).collect();
            for p in &paths {
                reporter.info(&format!(" - {}", p));
            }
            return Ok(GenerationOutcome::DryRun {
                uid: uid.to_string(),
                paths,
            });
        }

        copy_template_to(&template_dir, &target_dir)?;
        let materializer = FileMaterializer::new(&target_dir, self.config.write_options())?;
        let result = materializer.write_all(&payload, reporter)?;

        if result.written.is_empty() {
            reporter.warn("No files were written.");
        } else {
            reporter.info(&format!("Wrote {} files", result.written.len()));
            for p in &result.written {
                let rel = p.strip_prefix(materializer.root()).unwrap_or(p);
                reporter.info(&format!(" - {}", rel.display()));
            }
        }

        Ok(GenerationOutcome::Generated {
            summary: GenerationSummary {
                uid: uid.to_string(),
                target_dir: materializer.root().display().to_string(),
                files: summarize_files(&payload),
            },
            result,
        })
    }
}
