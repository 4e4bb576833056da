use crate::Language;

/// Fixed user-facing strings of the saved-forms view.
///
/// Each label resolves to its Spanish or Portuguese text through [`Label::text`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    SavedForms,
    NoSavedForms,
    SelectFormHint,
    Date,
    Category,
    Question,
    Answer,
    Observation,
    NoAnswer,
    Edit,
    Editing,
    SaveChanges,
    DiscardChanges,
    Delete,
    ConfirmDelete,
    GeneratePdf,
    ChartTitle,
    ReportTitle,
    ChangesSaved,
    ChangesDiscarded,
    FormDeleted,
    PdfSaved,
    InvalidSelection,
    NoSelection,
    ChartNotReady,
    UnsavedChanges,
    DocumentFailed,
    Quit,
    Navigate,
}

impl Label {
    /// Resolve the label in the given language.
    pub fn text(self, language: Language) -> &'static str {
        let (es, pt) = match self {
            Self::SavedForms => ("Cuestionarios guardados", "Questionários salvos"),
            Self::NoSavedForms => (
                "No hay cuestionarios guardados",
                "Não há questionários salvos",
            ),
            Self::SelectFormHint => (
                "Seleccione un cuestionario de la lista",
                "Selecione um questionário da lista",
            ),
            Self::Date => ("Fecha", "Data"),
            Self::Category => ("Categoría", "Categoria"),
            Self::Question => ("Pregunta", "Pergunta"),
            Self::Answer => ("Respuesta", "Resposta"),
            Self::Observation => ("Observación", "Observação"),
            Self::NoAnswer => ("Sin respuesta", "Sem resposta"),
            Self::Edit => ("Editar", "Editar"),
            Self::Editing => ("Editando", "Editando"),
            Self::SaveChanges => ("Guardar cambios", "Salvar alterações"),
            Self::DiscardChanges => ("Descartar cambios", "Descartar alterações"),
            Self::Delete => ("Eliminar", "Excluir"),
            Self::ConfirmDelete => (
                "¿Eliminar este cuestionario? (s/n)",
                "Excluir este questionário? (s/n)",
            ),
            Self::GeneratePdf => ("Generar PDF", "Gerar PDF"),
            Self::ChartTitle => (
                "Puntuación media por categoría",
                "Pontuação média por categoria",
            ),
            Self::ReportTitle => ("Informe DORA", "Relatório DORA"),
            Self::ChangesSaved => ("Cambios guardados", "Alterações salvas"),
            Self::ChangesDiscarded => ("Cambios descartados", "Alterações descartadas"),
            Self::FormDeleted => ("Cuestionario eliminado", "Questionário excluído"),
            Self::PdfSaved => ("PDF guardado en", "PDF salvo em"),
            Self::InvalidSelection => (
                "El cuestionario seleccionado no existe",
                "O questionário selecionado não existe",
            ),
            Self::NoSelection => (
                "Primero seleccione un cuestionario",
                "Primeiro selecione um questionário",
            ),
            Self::ChartNotReady => (
                "El gráfico todavía no está listo",
                "O gráfico ainda não está pronto",
            ),
            Self::UnsavedChanges => (
                "Guarde o descarte los cambios antes de generar el PDF",
                "Salve ou descarte as alterações antes de gerar o PDF",
            ),
            Self::DocumentFailed => ("No se pudo generar el PDF", "Não foi possível gerar o PDF"),
            Self::Quit => ("Salir", "Sair"),
            Self::Navigate => ("Navegar", "Navegar"),
        };
        match language {
            Language::Es => es,
            Language::Pt => pt,
        }
    }
}
