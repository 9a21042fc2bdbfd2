use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::VectorizerConfig;
use crate::error::Result;
use crate::vectorizer::{tfidf::TFIDFEngine, vocabulary::Vocabulary, TextVectorizer};

/// Serializable form of `TextVectorizer`.
/// It carries only the configuration and the vocabulary; IDF values are
/// derived again on conversion, so the engine can be chosen at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextVectorizerData {
    pub config: VectorizerConfig,
    pub vocabulary: Vocabulary,
}

impl TextVectorizerData {
    /// Convert into a `TextVectorizer` using engine `E`
    ///
    /// # Errors
    /// `InvalidConfig` if the stored configuration does not validate
    pub fn into_text_vectorizer<E>(self) -> Result<TextVectorizer<E>>
    where
        E: TFIDFEngine,
    {
        self.config.validate()?;
        Ok(TextVectorizer::from_vocabulary(self.vocabulary, self.config))
    }
}

impl<E> Serialize for TextVectorizer<E>
where
    E: TFIDFEngine,
{
    /// Writes the same shape as `TextVectorizerData`; the IDF cache is left out
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("TextVectorizer", 2)?;
        state.serialize_field("config", &self.config)?;
        state.serialize_field("vocabulary", &self.vocabulary)?;
        state.end()
    }
}

impl<'de, E> Deserialize<'de> for TextVectorizer<E>
where
    E: TFIDFEngine,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        TextVectorizerData::deserialize(deserializer)?
            .into_text_vectorizer()
            .map_err(serde::de::Error::custom)
    }
}
