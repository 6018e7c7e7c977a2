//! Region table: five fixed regions bound to team indices 0-4.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Region {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub static REGIONS: [Region; 5] = [
    Region {
        id: "thu-do",
        name: "Thủ đô",
        description: "Trung tâm chính trị, văn hóa (Hà Nội, Hải Phòng, Quảng Ninh)",
    },
    Region {
        id: "duyen-hai",
        name: "Duyên hải",
        description: "Ven biển miền Trung (Đà Nẵng, Quảng Nam, Bình Định)",
    },
    Region {
        id: "tay-nguyen",
        name: "Tây Nguyên",
        description: "Cao nguyên, nông lâm nghiệp (Đắk Lắk, Gia Lai, Kon Tum)",
    },
    Region {
        id: "dong-bang",
        name: "Đồng bằng",
        description: "Vựa lúa quốc gia (Cần Thơ, An Giang, Đồng Tháp)",
    },
    Region {
        id: "mien-dong",
        name: "Miền Đông",
        description: "Công nghiệp, kinh tế trọng điểm (TP.HCM, Bình Dương, Đồng Nai)",
    },
];

pub fn region_for_index(index: usize) -> Option<&'static Region> {
    REGIONS.get(index)
}
