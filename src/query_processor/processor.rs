use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use strum::Display;
use tracing::{debug, info, warn};

use super::classifier::KeywordClassifier;
use super::models::ExtractionResult;
use super::price::resolve_price;
use crate::core::config::ParserConfig;
use crate::core::error::DegradedReason;
use crate::embedding::{SentenceEmbedder, SentenceEncoder, TeiEncoder};
use crate::lexicon::{LexiconSet, LexiconStats};
use crate::nlp::{JiebaSegmenter, Segmenter, normalize};
use crate::semantic::{SemanticExpander, WordVectorModel, WordVectors};
use crate::utils::{query_fingerprint, safe_truncate};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OptionalFeature {
    SemanticExpansion,
    SentenceEncoder,
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Degradation {
    pub feature: OptionalFeature,
    pub reason: DegradedReason,
}


/// A result plus every optional feature that fell back while producing it.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub normalized_query: String,
    pub result: ExtractionResult,
    pub degradations: Vec<Degradation>,
}

impl Extraction {
    pub fn degraded(&self, feature: OptionalFeature) -> Option<&DegradedReason> {
        self.degradations
            .iter()
            .find(|d| d.feature == feature)
            .map(|d| &d.reason)
    }
}


#[derive(Debug, Clone, Serialize)]
pub struct ParserStatus {
    pub lexicon: LexiconStats,
    pub word_vectors_loaded: bool,
    pub word_vectors_vocab: usize,
    pub encoder_enabled: bool,
    pub encoder_model: Option<String>,
    pub vector_cache: Option<crate::core::cache::CacheStats>,
}


/// The query-to-structure pipeline. Immutable after construction and shared across requests.
pub struct QueryParser {
    classifier: KeywordClassifier,
    segmenter: Arc<dyn Segmenter>,
    expander: SemanticExpander,
    embedder: SentenceEmbedder,
}

impl QueryParser {

    pub fn new(
        lexicon: Arc<LexiconSet>,
        segmenter: Arc<dyn Segmenter>,
        expander: SemanticExpander,
        embedder: SentenceEmbedder,
    ) -> Self {
        Self {
            classifier: KeywordClassifier::new(lexicon),
            segmenter,
            expander,
            embedder,
        }
    }

    /// Built-in dictionaries, jieba segmentation, no optional models.
    pub fn with_builtin_lexicon() -> Self {
        let lexicon = Arc::new(LexiconSet::builtin());
        let segmenter = Arc::new(JiebaSegmenter::with_lexicon(&lexicon));
        Self::new(
            lexicon,
            segmenter,
            SemanticExpander::disabled(),
            SentenceEmbedder::fallback_only(),
        )
    }

    /// One-time startup: dictionaries, segmenter, then the optional models.
    ///
    /// Optional models that are missing or fail to come up are disabled, never fatal.
    pub async fn initialize(config: &ParserConfig) -> Self {
        info!("Initializing query parser...");

        let lexicon = Arc::new(LexiconSet::load(config));

        let mut segmenter = JiebaSegmenter::with_lexicon(&lexicon);
        segmenter.load_user_dict(&config.custom_words_path);

        let word_vectors: Option<Arc<dyn WordVectorModel>> =
            match WordVectors::load(&config.word_vectors_path) {
                Ok(model) => Some(Arc::new(model)),
                Err(e) => {
                    let reason = DegradedReason::from(e);
                    match reason {
                        DegradedReason::ModelAbsent => info!(
                            "Word vectors not found at {}, semantic expansion disabled",
                            config.word_vectors_path.display()
                        ),
                        other => warn!("Word vectors unavailable ({}), semantic expansion disabled", other),
                    }
                    None
                }
            };

        let encoder = Self::connect_encoder(config).await;

        let parser = Self::new(
            lexicon,
            Arc::new(segmenter),
            SemanticExpander::new(word_vectors, config.expansion_topn),
            SentenceEmbedder::new(encoder, config.vector_cache_size, config.sentence_vector_dims)
                .with_budget(Duration::from_millis(config.encoder_timeout_ms)),
        );

        info!(
            "Query parser ready: semantic_expansion={}, sentence_encoder={}",
            parser.expander.is_enabled(),
            parser.embedder.is_encoder_enabled()
        );
        parser
    }

    async fn connect_encoder(config: &ParserConfig) -> Option<Arc<dyn SentenceEncoder>> {
        let Some(url) = config.encoder_url.as_deref() else {
            info!("No encoder configured, sentence vectors use surface features");
            return None;
        };

        let encoder = match TeiEncoder::new(
            url,
            &config.encoder_model,
            Duration::from_millis(config.encoder_timeout_ms),
        ) {
            Ok(encoder) => encoder,
            Err(e) => {
                warn!("Encoder client could not be built: {}, using surface features", e);
                return None;
            }
        };

        let timeout = Duration::from_secs(config.encoder_startup_timeout_secs);
        match encoder.probe(timeout).await {
            Ok(dims) => {
                info!("Encoder {} reachable at {} (hidden size {})", config.encoder_model, url, dims);
                Some(Arc::new(encoder))
            }
            Err(e) => {
                warn!("Encoder probe failed: {}, using surface features", e);
                None
            }
        }
    }


    pub async fn extract(&self, raw_query: &str) -> ExtractionResult {
        self.extract_detailed(raw_query).await.result
    }

    pub async fn extract_detailed(&self, raw_query: &str) -> Extraction {
        let normalized = normalize(raw_query);
        debug!(
            "Extracting query {} '{}'",
            query_fingerprint(&normalized),
            safe_truncate(&normalized, 50)
        );

        let tokens = self.segmenter.segment(&normalized);
        let mut result = self.classifier.classify(&tokens);

        if result.price.is_none() {
            if let Some(resolved) = resolve_price(&normalized) {
                if let Some((price, condition)) = resolved.value {
                    result.price = Some(price);
                    result.price_condition = Some(condition);
                }
            }
        }

        let mut degradations = Vec::new();

        let (expansion, failures) =
            self.expander
                .expand_all(&result.brand, &result.tier, &result.mode);
        result.semantic_expansion = expansion;
        degradations.extend(failures.into_iter().map(|reason| Degradation {
            feature: OptionalFeature::SemanticExpansion,
            reason,
        }));

        let (vector, reason) = self.embedder.embed(&normalized, tokens.len()).await;
        result.sentence_vector = vector;
        if let Some(reason) = reason {
            degradations.push(Degradation {
                feature: OptionalFeature::SentenceEncoder,
                reason,
            });
        }

        for d in degradations.iter().filter(|d| !d.reason.is_expected()) {
            warn!("{} degraded: {}", d.feature, d.reason);
        }

        Extraction {
            normalized_query: normalized,
            result,
            degradations,
        }
    }


    pub fn status(&self) -> ParserStatus {
        ParserStatus {
            lexicon: self.classifier.lexicon().stats(),
            word_vectors_loaded: self.expander.is_enabled(),
            word_vectors_vocab: self.expander.model().map_or(0, |m| m.vocab_size()),
            encoder_enabled: self.embedder.is_encoder_enabled(),
            encoder_model: self.embedder.encoder_model().map(str::to_string),
            vector_cache: self.embedder.cache_stats(),
        }
    }
}
