//! Detail modal for a single finding.

use predictus_core::FindingRecord;
use predictus_core::format::{display_text, format_currency_opt};

/// The fixed set of fields the detail modal shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailSlot {
    Branch,
    Class,
    Instance,
    DistributionDate,
    Status,
    ClaimValue,
    ProvisionalRelief,
    OtherParties,
    Rulings,
    Movement1,
    Movement2,
    Movement3,
    UpdatedAt,
}

impl DetailSlot {
    /// All slots in display order.
    pub const ALL: [DetailSlot; 13] = [
        Self::Branch,
        Self::Class,
        Self::Instance,
        Self::DistributionDate,
        Self::Status,
        Self::ClaimValue,
        Self::ProvisionalRelief,
        Self::OtherParties,
        Self::Rulings,
        Self::Movement1,
        Self::Movement2,
        Self::Movement3,
        Self::UpdatedAt,
    ];

    /// Element id the page markup uses for this slot.
    pub fn dom_id(self) -> &'static str {
        match self {
            Self::Branch => "det-ramo",
            Self::Class => "det-classe",
            Self::Instance => "det-instancia",
            Self::DistributionDate => "det-distribuicao",
            Self::Status => "det-status",
            Self::ClaimValue => "det-valor",
            Self::ProvisionalRelief => "det-tutela",
            Self::OtherParties => "det-outras-partes",
            Self::Rulings => "det-julgamentos",
            Self::Movement1 => "det-mov1",
            Self::Movement2 => "det-mov2",
            Self::Movement3 => "det-mov3",
            Self::UpdatedAt => "det-atualizacao",
        }
    }

    /// Caption shown next to the value on the card.
    pub fn label(self) -> &'static str {
        match self {
            Self::Branch => "Ramo do Direito",
            Self::Class => "Classe Processual",
            Self::Instance => "Instância",
            Self::DistributionDate => "Data de Distribuição",
            Self::Status => "Status",
            Self::ClaimValue => "Valor da Causa",
            Self::ProvisionalRelief => "Tutela Antecipada",
            Self::OtherParties => "Outras Partes",
            Self::Rulings => "Julgamentos",
            Self::Movement1 => "1ª Movimentação",
            Self::Movement2 => "2ª Movimentação",
            Self::Movement3 => "3ª Movimentação",
            Self::UpdatedAt => "Data de Atualização",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn text_for(self, record: &FindingRecord) -> String {
        let field = match self {
            Self::ClaimValue => return format_currency_opt(record.claim_value.as_ref()),
            Self::Branch => &record.legal_branch,
            Self::Class => &record.procedural_class,
            Self::Instance => &record.instance,
            Self::DistributionDate => &record.distribution_date,
            Self::Status => &record.status,
            Self::ProvisionalRelief => &record.provisional_relief,
            Self::OtherParties => &record.other_parties,
            Self::Rulings => &record.rulings,
            Self::Movement1 => &record.movement_1,
            Self::Movement2 => &record.movement_2,
            Self::Movement3 => &record.movement_3,
            Self::UpdatedAt => &record.updated_at,
        };
        display_text(field.as_ref())
    }
}

/// Where a click on the open modal landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed background around the content.
    Overlay,
    /// Anything inside the modal content box.
    Content,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailView {
    visible: bool,
    values: [String; 13],
}

impl DetailView {
    /// Fill every slot from `record` and show the modal.
    ///
    /// Slots are overwritten, so nothing from a previously opened record
    /// survives.
    pub fn open(&mut self, record: &FindingRecord) {
        for slot in DetailSlot::ALL {
            self.values[slot.index()] = slot.text_for(record);
        }
        self.visible = true;
    }

    /// Hide the card; the last values stay until the next open.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Close only when the click hit the overlay itself.
    pub fn overlay_click(&mut self, target: ClickTarget) {
        if target == ClickTarget::Overlay {
            self.close();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Text currently shown in a slot.
    pub fn get(&self, slot: DetailSlot) -> &str {
        &self.values[slot.index()]
    }

    /// Slots with their current text, in display order.
    pub fn fields(&self) -> impl Iterator<Item = (DetailSlot, &str)> {
        DetailSlot::ALL.into_iter().map(|slot| (slot, self.get(slot)))
    }
}
