use strum::{Display, EnumIter, IntoStaticStr};

/// Logical columns the feed is built from, independent of the header text a
/// sheet editor happens to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum LogicalField {
    Coordinate,
    Name,
    Updated,
    Weight,
    Count,
    Address,
}

impl LogicalField {
    /// Accepted header spellings.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            LogicalField::Coordinate => &["プロット用緯度経度", "緯度経度", "latlng", "座標"],
            LogicalField::Name => &["ポート名", "名称", "name"],
            LogicalField::Updated => &["更新日時", "更新日", "updated"],
            LogicalField::Weight => &["電池交換比重", "比重", "weight"],
            LogicalField::Count => &[
                "目安交換台数(電池4以下)",
                "目安交換台数",
                "台数",
                "count",
            ],
            LogicalField::Address => &["住所", "所在地", "address"],
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, LogicalField::Address)
    }
}

/// Column positions of every logical field in the fetched grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldIndex {
    coordinate: usize,
    name: usize,
    updated: usize,
    weight: usize,
    count: usize,
    address: Option<usize>,
}

impl FieldIndex {
    pub fn new(
        coordinate: usize,
        name: usize,
        updated: usize,
        weight: usize,
        count: usize,
        address: Option<usize>,
    ) -> Self {
        Self {
            coordinate,
            name,
            updated,
            weight,
            count,
            address,
        }
    }

    pub fn column(&self, field: LogicalField) -> Option<usize> {
        match field {
            LogicalField::Coordinate => Some(self.coordinate),
            LogicalField::Name => Some(self.name),
            LogicalField::Updated => Some(self.updated),
            LogicalField::Weight => Some(self.weight),
            LogicalField::Count => Some(self.count),
            LogicalField::Address => self.address,
        }
    }
}
