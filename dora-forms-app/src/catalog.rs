//! Question catalog: the built-in DORA questionnaire or one loaded from JSON.

use std::path::{Path, PathBuf};

use dora_forms::{Category, Localized, Question};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Question {question} refers to unknown category {category}")]
    UnknownCategory { question: u32, category: u32 },
}

/// Questions and the categories grouping them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub questions: Vec<Question>,
}

impl Catalog {
    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate a catalog from JSON text.
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for question in &self.questions {
            if !self.categories.iter().any(|c| c.id == question.category) {
                return Err(CatalogError::UnknownCategory {
                    question: question.id.get(),
                    category: question.category,
                });
            }
        }
        Ok(())
    }

    /// The built-in DORA questionnaire in Spanish and Portuguese.
    pub fn dora() -> Self {
        let categories = vec![
            Category::new(
                1,
                Localized::new("Rendimiento de entrega", "Desempenho de entrega"),
            ),
            Category::new(2, Localized::new("Capacidades técnicas", "Capacidades técnicas")),
            Category::new(3, Localized::new("Procesos", "Processos")),
            Category::new(4, Localized::new("Cultura", "Cultura")),
        ];

        let q = |id, category, es: &str, pt: &str| Question::new(id, category, Localized::new(es, pt));
        let questions = vec![
            q(
                1,
                1,
                "¿Con qué frecuencia se despliega a producción?",
                "Com que frequência se implanta em produção?",
            ),
            q(
                2,
                1,
                "¿Cuánto tarda un cambio en llegar a producción?",
                "Quanto tempo leva uma alteração para chegar à produção?",
            ),
            q(
                3,
                1,
                "¿Con qué rapidez se restablece el servicio tras un incidente?",
                "Com que rapidez o serviço é restabelecido após um incidente?",
            ),
            q(
                4,
                1,
                "¿Qué porcentaje de cambios provoca fallos?",
                "Que porcentagem de alterações provoca falhas?",
            ),
            q(
                5,
                2,
                "¿Está automatizado el despliegue?",
                "A implantação é automatizada?",
            ),
            q(
                6,
                2,
                "¿Se ejecutan pruebas automatizadas en cada cambio?",
                "Testes automatizados são executados a cada alteração?",
            ),
            q(
                7,
                2,
                "¿Se integra el código en la rama principal a diario?",
                "O código é integrado ao ramo principal diariamente?",
            ),
            q(
                8,
                3,
                "¿Los cambios se revisan de forma ligera?",
                "As alterações são revisadas de forma leve?",
            ),
            q(
                9,
                3,
                "¿El trabajo se divide en lotes pequeños?",
                "O trabalho é dividido em pequenos lotes?",
            ),
            q(
                10,
                3,
                "¿Se monitoriza el sistema de forma proactiva?",
                "O sistema é monitorado de forma proativa?",
            ),
            q(
                11,
                4,
                "¿Se comparte la información entre equipos?",
                "As informações são compartilhadas entre equipes?",
            ),
            q(
                12,
                4,
                "¿Los fallos se tratan como oportunidades de aprendizaje?",
                "As falhas são tratadas como oportunidades de aprendizado?",
            ),
        ];

        Self {
            categories,
            questions,
        }
    }
}
