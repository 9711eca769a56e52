//! Keyword vocabularies for tag and domain detection.
//!
//! Entries pair a Vietnamese tag or domain name with its trigger keywords
//! (Vietnamese and English variants). Table order is significant: domain
//! detection breaks score ties by position.

/// Domain names with their detection keywords.
pub const DOMAIN_DEFINITIONS: &[(&str, &[&str])] = &[
    (
        "Y học",
        &[
            "y học", "y tế", "bệnh viện", "bác sĩ", "điều trị", "chẩn đoán",
            "thuốc", "bệnh nhân", "lâm sàng", "phẫu thuật", "y khoa", "sức khỏe",
            "medical", "medicine", "healthcare", "hospital", "doctor", "patient",
        ],
    ),
    (
        "Công nghệ thông tin",
        &[
            "công nghệ thông tin", "CNTT", "phần mềm", "lập trình", "máy tính",
            "dữ liệu", "database", "software", "programming", "IT", "computer",
            "internet", "web", "app", "cloud", "AI", "machine learning",
        ],
    ),
    (
        "Kinh tế - Tài chính",
        &[
            "kinh tế", "tài chính", "ngân hàng", "đầu tư", "chứng khoán",
            "thị trường", "doanh nghiệp", "kinh doanh", "thương mại", "xuất nhập khẩu",
            "economics", "finance", "banking", "investment", "stock", "business",
        ],
    ),
    (
        "Luật",
        &[
            "luật", "pháp luật", "quy định", "nghị định", "thông tư", "hiến pháp",
            "tòa án", "luật sư", "hợp đồng", "vi phạm", "hình sự", "dân sự",
            "law", "legal", "regulation", "court", "attorney", "contract",
        ],
    ),
    (
        "Giáo dục",
        &[
            "giáo dục", "đào tạo", "trường học", "đại học", "sinh viên", "học sinh",
            "giảng viên", "giáo viên", "chương trình", "học tập", "thi cử",
            "education", "training", "university", "student", "teacher", "learning",
        ],
    ),
    (
        "Khoa học kỹ thuật",
        &[
            "kỹ thuật", "công nghệ", "kỹ sư", "engineering", "technical",
            "cơ khí", "điện", "điện tử", "tự động hóa", "robot",
        ],
    ),
    (
        "Nông nghiệp",
        &[
            "nông nghiệp", "trồng trọt", "chăn nuôi", "nông sản", "cây trồng",
            "vật nuôi", "agriculture", "farming", "crop", "livestock",
        ],
    ),
    (
        "Xây dựng",
        &[
            "xây dựng", "kiến trúc", "công trình", "nhà ở", "bất động sản",
            "construction", "architecture", "building", "real estate",
        ],
    ),
    (
        "Du lịch - Khách sạn",
        &[
            "du lịch", "khách sạn", "nhà hàng", "resort", "tourism", "hotel",
            "travel", "hospitality", "tour",
        ],
    ),
    (
        "Môi trường",
        &[
            "môi trường", "sinh thái", "ô nhiễm", "khí hậu", "biến đổi khí hậu",
            "environment", "ecology", "pollution", "climate",
        ],
    ),
];

/// Tag names with their trigger keywords, grouped by field.
pub const TAG_DEFINITIONS: &[(&str, &[&str])] = &[
    // Y học: chuyên khoa
    (
        "Tim mạch",
        &[
            "tim mạch", "tim", "mạch máu", "động mạch", "tĩnh mạch",
            "van tim", "nhồi máu", "suy tim", "loạn nhịp", "rung nhĩ",
            "nhĩ", "thất", "động mạch vành", "cardiovascular", "cardiac",
            "ECG", "điện tâm đồ", "siêu âm tim", "cấy ghép tim", "stent",
        ],
    ),
    (
        "Huyết áp",
        &[
            "huyết áp", "tăng huyết áp", "hạ huyết áp", "cao huyết áp",
            "huyết áp tâm thu", "huyết áp tâm trương", "hypertension",
            "hypotension", "blood pressure", "mmHg",
        ],
    ),
    (
        "Hô hấp",
        &[
            "hô hấp", "phổi", "phế quản", "viêm phổi", "hen suyễn",
            "COPD", "khó thở", "thở máy", "oxy", "pneumonia", "asthma",
            "thông khí", "respiratory",
        ],
    ),
    (
        "Tiêu hóa",
        &[
            "tiêu hóa", "dạ dày", "ruột", "gan", "mật", "tụy",
            "viêm gan", "xơ gan", "viêm loét", "trào ngược", "táo bón",
            "tiêu chảy", "hepatitis", "gastric",
        ],
    ),
    (
        "Thần kinh",
        &[
            "thần kinh", "não", "tủy sống", "đột quỵ", "Parkinson",
            "Alzheimer", "động kinh", "migraine", "đau đầu", "stroke",
            "neurological", "neurology",
        ],
    ),
    (
        "Nội tiết",
        &[
            "nội tiết", "đái tháo đường", "tiểu đường", "tuyến giáp",
            "insulin", "glucose", "HbA1c", "diabetes", "thyroid",
            "hormone", "cortisol",
        ],
    ),
    (
        "Thận - Tiết niệu",
        &[
            "thận", "tiết niệu", "suy thận", "lọc máu", "thẩm phân",
            "creatinine", "GFR", "protein niệu", "kidney", "renal",
            "dialysis", "nephrology",
        ],
    ),
    (
        "Cơ xương khớp",
        &[
            "cơ xương khớp", "xương", "khớp", "viêm khớp", "loãng xương",
            "gout", "thấp khớp", "thoái hóa", "orthopedic", "arthritis",
        ],
    ),
    (
        "Ung bướu",
        &[
            "ung thư", "ung bướu", "khối u", "hóa trị", "xạ trị",
            "di căn", "cancer", "tumor", "oncology", "chemotherapy",
        ],
    ),
    (
        "Da liễu",
        &[
            "da liễu", "da", "nấm", "vảy nến", "eczema", "mụn",
            "dermatology", "skin", "psoriasis",
        ],
    ),
    (
        "Mắt",
        &[
            "mắt", "nhãn khoa", "đục thủy tinh thể", "glaucoma",
            "cận thị", "viễn thị", "võng mạc", "ophthalmology",
        ],
    ),
    (
        "Tai mũi họng",
        &[
            "tai mũi họng", "viêm họng", "viêm xoang", "viêm tai",
            "ENT", "otolaryngology", "sinusitis",
        ],
    ),
    (
        "Nhi khoa",
        &[
            "nhi khoa", "trẻ em", "sơ sinh", "pediatric", "infant",
            "trẻ sơ sinh", "tiêm chủng",
        ],
    ),
    (
        "Sản phụ khoa",
        &[
            "sản phụ khoa", "thai kỳ", "sinh", "phụ nữ", "gynecology",
            "obstetrics", "pregnancy", "childbirth",
        ],
    ),
    (
        "Truyền nhiễm",
        &[
            "truyền nhiễm", "nhiễm trùng", "vi khuẩn", "virus", "kháng sinh",
            "infectious", "infection", "antibiotic", "COVID", "HIV", "AIDS",
        ],
    ),
    (
        "Huyết học",
        &[
            "huyết học", "máu", "thiếu máu", "đông máu", "bạch cầu",
            "hồng cầu", "tiểu cầu", "hematology", "anemia", "leukemia",
        ],
    ),
    (
        "Dị ứng - Miễn dịch",
        &[
            "dị ứng", "miễn dịch", "sốc phản vệ", "allergy", "immune",
            "autoimmune", "lupus",
        ],
    ),
    // Y học: loại can thiệp
    (
        "Điều trị nội khoa",
        &[
            "điều trị nội khoa", "thuốc", "dược", "liều", "dose",
            "medication", "drug", "pharmaceutical",
        ],
    ),
    (
        "Can thiệp - Phẫu thuật",
        &[
            "phẫu thuật", "can thiệp", "mổ", "surgery", "intervention",
            "procedure", "operation", "nội soi",
        ],
    ),
    (
        "Chẩn đoán y khoa",
        &[
            "chẩn đoán", "xét nghiệm", "diagnostic", "test", "diagnosis",
            "imaging", "hình ảnh y khoa", "MRI", "CT", "X-quang",
        ],
    ),
    (
        "Phòng ngừa - Dự phòng",
        &[
            "phòng ngừa", "dự phòng", "prevention", "prophylaxis",
            "vaccine", "vắc xin", "tiêm phòng",
        ],
    ),
    (
        "Cấp cứu - Hồi sức",
        &[
            "cấp cứu", "emergency", "hồi sức", "ICU", "resuscitation",
            "acute", "cấp tính",
        ],
    ),
    (
        "Phác đồ Bộ Y Tế",
        &[
            "phác đồ", "bộ y tế", "hướng dẫn điều trị", "quy trình y tế",
            "protocol", "guideline", "ministry of health", "MOH",
        ],
    ),
    // Công nghệ thông tin
    (
        "Lập trình",
        &[
            "lập trình", "programming", "code", "coding", "developer",
            "phát triển phần mềm", "software development",
        ],
    ),
    (
        "Python",
        &[
            "python", "django", "flask", "pandas", "numpy", "pytorch",
            "tensorflow", "jupyter", "pip",
        ],
    ),
    (
        "JavaScript",
        &[
            "javascript", "nodejs", "node.js", "react", "vue", "angular",
            "typescript", "npm", "express",
        ],
    ),
    (
        "Java",
        &[
            "java", "spring", "spring boot", "maven", "gradle", "jvm",
            "hibernate", "kotlin",
        ],
    ),
    (
        "C/C++",
        &[
            "c++", "c programming", "pointer", "memory management",
            "gcc", "makefile",
        ],
    ),
    (
        "Database",
        &[
            "database", "cơ sở dữ liệu", "SQL", "MySQL", "PostgreSQL",
            "MongoDB", "Redis", "NoSQL", "query", "table", "index",
        ],
    ),
    (
        "Cloud Computing",
        &[
            "cloud", "đám mây", "AWS", "Azure", "GCP", "Google Cloud",
            "serverless", "lambda", "S3", "EC2", "kubernetes", "docker",
        ],
    ),
    (
        "DevOps",
        &[
            "devops", "CI/CD", "continuous integration", "deployment",
            "jenkins", "gitlab", "github actions", "terraform", "ansible",
        ],
    ),
    (
        "Mạng máy tính",
        &[
            "network", "mạng", "TCP/IP", "HTTP", "DNS", "firewall",
            "router", "switch", "VPN", "load balancer",
        ],
    ),
    (
        "Bảo mật",
        &[
            "security", "bảo mật", "cybersecurity", "encryption", "mã hóa",
            "authentication", "authorization", "SSL", "TLS", "hacking",
        ],
    ),
    (
        "Trí tuệ nhân tạo",
        &[
            "AI", "artificial intelligence", "trí tuệ nhân tạo",
            "machine learning", "học máy", "deep learning", "neural network",
            "mạng neural", "NLP", "computer vision",
        ],
    ),
    (
        "Data Science",
        &[
            "data science", "khoa học dữ liệu", "data analysis", "phân tích dữ liệu",
            "big data", "data mining", "visualization", "trực quan hóa",
        ],
    ),
    (
        "Blockchain",
        &[
            "blockchain", "crypto", "cryptocurrency", "bitcoin", "ethereum",
            "smart contract", "NFT", "DeFi", "web3",
        ],
    ),
    (
        "Web Development",
        &[
            "web", "website", "frontend", "backend", "fullstack",
            "HTML", "CSS", "responsive", "API", "REST",
        ],
    ),
    (
        "Mobile Development",
        &[
            "mobile", "ứng dụng di động", "iOS", "Android", "React Native",
            "Flutter", "Swift", "Kotlin mobile",
        ],
    ),
    (
        "Game Development",
        &[
            "game", "game development", "Unity", "Unreal", "game engine",
            "2D", "3D", "VR", "AR",
        ],
    ),
    // Kinh tế - Tài chính
    (
        "Ngân hàng",
        &[
            "ngân hàng", "bank", "banking", "tín dụng", "credit",
            "tiền gửi", "deposit", "khoản vay", "loan", "lãi suất", "interest rate",
        ],
    ),
    (
        "Chứng khoán",
        &[
            "chứng khoán", "stock", "cổ phiếu", "share", "thị trường chứng khoán",
            "stock market", "sàn giao dịch", "VN-Index", "trader",
        ],
    ),
    (
        "Đầu tư",
        &[
            "đầu tư", "investment", "investor", "nhà đầu tư", "portfolio",
            "danh mục", "quỹ đầu tư", "fund", "ROI", "return",
        ],
    ),
    (
        "Bảo hiểm",
        &[
            "bảo hiểm", "insurance", "premium", "phí bảo hiểm", "claim",
            "bồi thường", "rủi ro", "risk",
        ],
    ),
    (
        "Fintech",
        &[
            "fintech", "công nghệ tài chính", "e-wallet", "ví điện tử",
            "payment", "thanh toán", "mobile banking",
        ],
    ),
    (
        "Kinh tế vĩ mô",
        &[
            "kinh tế vĩ mô", "macroeconomics", "GDP", "lạm phát", "inflation",
            "tăng trưởng", "growth", "chính sách tiền tệ", "monetary policy",
        ],
    ),
    (
        "Thương mại quốc tế",
        &[
            "thương mại quốc tế", "xuất khẩu", "nhập khẩu", "export", "import",
            "FTA", "WTO", "hải quan", "customs", "thuế quan", "tariff",
        ],
    ),
    (
        "Kinh tế vi mô",
        &[
            "kinh tế vi mô", "microeconomics", "cung cầu", "supply demand",
            "giá cả", "price", "thị trường", "market",
        ],
    ),
    (
        "Quản trị doanh nghiệp",
        &[
            "quản trị", "management", "doanh nghiệp", "enterprise", "CEO",
            "chiến lược", "strategy", "tổ chức", "organization",
        ],
    ),
    (
        "Marketing",
        &[
            "marketing", "tiếp thị", "quảng cáo", "advertising", "brand",
            "thương hiệu", "digital marketing", "SEO", "social media",
        ],
    ),
    (
        "Kế toán - Kiểm toán",
        &[
            "kế toán", "accounting", "kiểm toán", "audit", "sổ sách",
            "báo cáo tài chính", "financial report", "thuế", "tax",
        ],
    ),
    (
        "Nhân sự",
        &[
            "nhân sự", "HR", "human resource", "tuyển dụng", "recruitment",
            "đào tạo nhân viên", "lương", "salary", "KPI",
        ],
    ),
    (
        "Khởi nghiệp",
        &[
            "khởi nghiệp", "startup", "entrepreneur", "founder", "venture capital",
            "VC", "pitch", "scale up",
        ],
    ),
    // Luật
    (
        "Luật Dân sự",
        &[
            "luật dân sự", "civil law", "hợp đồng", "contract", "tài sản",
            "property", "thừa kế", "inheritance", "quyền sở hữu",
        ],
    ),
    (
        "Luật Hình sự",
        &[
            "luật hình sự", "criminal law", "tội phạm", "crime", "hình phạt",
            "punishment", "án tù", "prison", "khởi tố",
        ],
    ),
    (
        "Luật Thương mại",
        &[
            "luật thương mại", "commercial law", "luật doanh nghiệp",
            "corporate law", "phá sản", "bankruptcy", "sáp nhập", "merger",
        ],
    ),
    (
        "Luật Lao động",
        &[
            "luật lao động", "labor law", "hợp đồng lao động", "employment",
            "sa thải", "termination", "bảo hiểm xã hội", "social insurance",
        ],
    ),
    (
        "Luật Hành chính",
        &[
            "luật hành chính", "administrative law", "nghị định", "decree",
            "thông tư", "circular", "quyết định", "decision",
        ],
    ),
    (
        "Luật Đất đai",
        &[
            "luật đất đai", "land law", "quyền sử dụng đất", "land use right",
            "sổ đỏ", "giấy chứng nhận", "quy hoạch", "planning",
        ],
    ),
    (
        "Sở hữu trí tuệ",
        &[
            "sở hữu trí tuệ", "intellectual property", "IP", "bằng sáng chế",
            "patent", "bản quyền", "copyright", "thương hiệu", "trademark",
        ],
    ),
    // Giáo dục
    (
        "Giáo dục phổ thông",
        &[
            "giáo dục phổ thông", "trung học", "tiểu học", "THPT", "THCS",
            "high school", "primary school", "secondary school",
        ],
    ),
    (
        "Giáo dục đại học",
        &[
            "đại học", "university", "cao đẳng", "college", "sinh viên",
            "student", "giảng viên", "lecturer", "học phần", "tín chỉ",
        ],
    ),
    (
        "Giáo dục nghề nghiệp",
        &[
            "đào tạo nghề", "vocational", "kỹ năng nghề", "chứng chỉ",
            "certificate", "thực hành",
        ],
    ),
    (
        "E-Learning",
        &[
            "e-learning", "học trực tuyến", "online learning", "MOOC",
            "khóa học online", "LMS", "video bài giảng",
        ],
    ),
    (
        "Nghiên cứu học thuật",
        &[
            "nghiên cứu", "research", "luận văn", "thesis", "luận án",
            "dissertation", "công bố", "publication", "journal",
        ],
    ),
    (
        "Phương pháp giảng dạy",
        &[
            "phương pháp giảng dạy", "teaching method", "sư phạm",
            "pedagogy", "đánh giá", "assessment", "kiểm tra",
        ],
    ),
    // Khoa học kỹ thuật
    (
        "Cơ khí",
        &[
            "cơ khí", "mechanical", "máy móc", "machine", "động cơ", "engine",
            "gia công", "manufacturing", "CNC",
        ],
    ),
    (
        "Điện - Điện tử",
        &[
            "điện", "electrical", "điện tử", "electronics", "mạch điện",
            "circuit", "IC", "chip", "PCB", "vi xử lý",
        ],
    ),
    (
        "Tự động hóa",
        &[
            "tự động hóa", "automation", "PLC", "SCADA", "robot",
            "robotics", "IoT", "sensor", "cảm biến",
        ],
    ),
    (
        "Hóa học - Hóa công",
        &[
            "hóa học", "chemistry", "chemical", "phản ứng", "reaction",
            "chất hóa học", "polymer", "vật liệu",
        ],
    ),
    (
        "Vật lý",
        &[
            "vật lý", "physics", "cơ học", "mechanics", "nhiệt động học",
            "thermodynamics", "quang học", "optics", "lượng tử", "quantum",
        ],
    ),
    (
        "Toán học",
        &[
            "toán học", "mathematics", "đại số", "algebra", "giải tích",
            "calculus", "thống kê", "statistics", "xác suất", "probability",
        ],
    ),
    // Nông nghiệp
    (
        "Trồng trọt",
        &[
            "trồng trọt", "cultivation", "cây trồng", "crop", "giống cây",
            "seed", "phân bón", "fertilizer", "thuốc trừ sâu", "pesticide",
        ],
    ),
    (
        "Chăn nuôi",
        &[
            "chăn nuôi", "livestock", "gia súc", "cattle", "gia cầm",
            "poultry", "thức ăn chăn nuôi", "feed",
        ],
    ),
    (
        "Thủy sản",
        &[
            "thủy sản", "aquaculture", "nuôi trồng thủy sản", "cá", "fish",
            "tôm", "shrimp", "ao nuôi",
        ],
    ),
    (
        "Nông nghiệp công nghệ cao",
        &[
            "nông nghiệp công nghệ cao", "smart farming", "nhà kính",
            "greenhouse", "tưới tiêu tự động", "precision agriculture",
        ],
    ),
    // Xây dựng - Bất động sản
    (
        "Kiến trúc",
        &[
            "kiến trúc", "architecture", "thiết kế", "design", "bản vẽ",
            "drawing", "quy hoạch", "urban planning",
        ],
    ),
    (
        "Xây dựng dân dụng",
        &[
            "xây dựng dân dụng", "civil construction", "nhà ở", "housing",
            "chung cư", "apartment", "biệt thự", "villa",
        ],
    ),
    (
        "Xây dựng công nghiệp",
        &[
            "xây dựng công nghiệp", "industrial construction", "nhà máy",
            "factory", "kho bãi", "warehouse",
        ],
    ),
    (
        "Bất động sản",
        &[
            "bất động sản", "real estate", "mua bán nhà", "property",
            "cho thuê", "rental", "môi giới", "broker",
        ],
    ),
    // Môi trường
    (
        "Biến đổi khí hậu",
        &[
            "biến đổi khí hậu", "climate change", "hiệu ứng nhà kính",
            "greenhouse effect", "carbon", "CO2", "nóng lên toàn cầu",
        ],
    ),
    (
        "Xử lý ô nhiễm",
        &[
            "ô nhiễm", "pollution", "xử lý nước thải", "wastewater",
            "xử lý rác", "waste treatment", "khí thải", "emission",
        ],
    ),
    (
        "Năng lượng tái tạo",
        &[
            "năng lượng tái tạo", "renewable energy", "năng lượng mặt trời",
            "solar", "điện gió", "wind power", "năng lượng sạch",
        ],
    ),
    (
        "Bảo tồn",
        &[
            "bảo tồn", "conservation", "đa dạng sinh học", "biodiversity",
            "khu bảo tồn", "wildlife", "động vật hoang dã",
        ],
    ),
    // Loại tài liệu (áp dụng chung)
    (
        "Nghiên cứu - Báo cáo",
        &[
            "nghiên cứu", "research", "báo cáo", "report", "phân tích",
            "analysis", "survey", "khảo sát",
        ],
    ),
    (
        "Giáo trình - Sách",
        &[
            "giáo trình", "textbook", "sách", "book", "chương", "chapter",
            "bài giảng", "lecture",
        ],
    ),
    (
        "Hướng dẫn - Quy trình",
        &[
            "hướng dẫn", "guide", "manual", "quy trình", "procedure",
            "hướng dẫn sử dụng", "tutorial",
        ],
    ),
    (
        "Văn bản pháp quy",
        &[
            "văn bản pháp quy", "legal document", "nghị định", "decree",
            "thông tư", "circular", "luật", "law", "quyết định",
        ],
    ),
    (
        "Tin tức - Bài viết",
        &[
            "tin tức", "news", "bài viết", "article", "blog", "báo chí",
            "press", "media",
        ],
    ),
];

/// All tag names, sorted for display.
pub fn available_tags() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = TAG_DEFINITIONS.iter().map(|(tag, _)| *tag).collect();
    names.sort_unstable();
    names
}

/// Domain names in detection order.
pub fn available_domains() -> Vec<&'static str> {
    DOMAIN_DEFINITIONS.iter().map(|(domain, _)| *domain).collect()
}

/// Keywords for one tag, empty if the tag is unknown.
pub fn tag_keywords(tag: &str) -> &'static [&'static str] {
    TAG_DEFINITIONS
        .iter()
        .find(|(name, _)| *name == tag)
        .map_or(&[], |(_, keywords)| keywords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tag_names_are_unique() {
        let names: HashSet<&str> = TAG_DEFINITIONS.iter().map(|(tag, _)| *tag).collect();
        assert_eq!(names.len(), TAG_DEFINITIONS.len());
    }

    #[test]
    fn domain_names_are_unique() {
        let names: HashSet<&str> = DOMAIN_DEFINITIONS.iter().map(|(d, _)| *d).collect();
        assert_eq!(names.len(), DOMAIN_DEFINITIONS.len());
    }

    #[test]
    fn every_entry_has_keywords() {
        for (tag, keywords) in TAG_DEFINITIONS {
            assert!(!keywords.is_empty(), "tag {tag} has no keywords");
        }
        for (domain, keywords) in DOMAIN_DEFINITIONS {
            assert!(!keywords.is_empty(), "domain {domain} has no keywords");
        }
    }

    #[test]
    fn keyword_lookup_by_tag() {
        assert!(tag_keywords("Tim mạch").contains(&"điện tâm đồ"));
        assert!(tag_keywords("không tồn tại").is_empty());
    }

    #[test]
    fn available_tags_sorted() {
        let tags = available_tags();
        assert_eq!(tags.len(), TAG_DEFINITIONS.len());
        assert!(tags.windows(2).all(|w| w[0] <= w[1]));
    }
}
