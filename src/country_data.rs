use crate::countries::Continent::{self, *};

/// `(code, English name, Korean name, continent, popular)`
pub(crate) const COUNTRY_TABLE: &[(&str, &str, &str, Continent, bool)] = &[
    // Asia
    ("KR", "South Korea", "대한민국", Asia, true),
    ("JP", "Japan", "일본", Asia, true),
    ("CN", "China", "중국", Asia, true),
    ("TW", "Taiwan", "대만", Asia, true),
    ("HK", "Hong Kong", "홍콩", Asia, true),
    ("MO", "Macau", "마카오", Asia, false),
    ("MN", "Mongolia", "몽골", Asia, false),
    ("KP", "North Korea", "북한", Asia, false),
    ("TH", "Thailand", "태국", Asia, true),
    ("VN", "Vietnam", "베트남", Asia, true),
    ("PH", "Philippines", "필리핀", Asia, true),
    ("SG", "Singapore", "싱가포르", Asia, true),
    ("MY", "Malaysia", "말레이시아", Asia, true),
    ("ID", "Indonesia", "인도네시아", Asia, true),
    ("KH", "Cambodia", "캄보디아", Asia, false),
    ("LA", "Laos", "라오스", Asia, false),
    ("MM", "Myanmar", "미얀마", Asia, false),
    ("BN", "Brunei", "브루나이", Asia, false),
    ("TL", "Timor-Leste", "동티모르", Asia, false),
    ("IN", "India", "인도", Asia, true),
    ("NP", "Nepal", "네팔", Asia, false),
    ("BT", "Bhutan", "부탄", Asia, false),
    ("BD", "Bangladesh", "방글라데시", Asia, false),
    ("LK", "Sri Lanka", "스리랑카", Asia, false),
    ("MV", "Maldives", "몰디브", Asia, true),
    ("PK", "Pakistan", "파키스탄", Asia, false),
    ("AF", "Afghanistan", "아프가니스탄", Asia, false),
    ("KZ", "Kazakhstan", "카자흐스탄", Asia, false),
    ("UZ", "Uzbekistan", "우즈베키스탄", Asia, false),
    ("KG", "Kyrgyzstan", "키르기스스탄", Asia, false),
    ("TJ", "Tajikistan", "타지키스탄", Asia, false),
    ("TM", "Turkmenistan", "투르크메니스탄", Asia, false),
    ("IR", "Iran", "이란", Asia, false),
    ("IQ", "Iraq", "이라크", Asia, false),
    ("SY", "Syria", "시리아", Asia, false),
    ("JO", "Jordan", "요르단", Asia, false),
    ("LB", "Lebanon", "레바논", Asia, false),
    ("IL", "Israel", "이스라엘", Asia, false),
    ("PS", "Palestine", "팔레스타인", Asia, false),
    ("SA", "Saudi Arabia", "사우디아라비아", Asia, false),
    ("AE", "United Arab Emirates", "아랍에미리트", Asia, true),
    ("QA", "Qatar", "카타르", Asia, false),
    ("BH", "Bahrain", "바레인", Asia, false),
    ("KW", "Kuwait", "쿠웨이트", Asia, false),
    ("OM", "Oman", "오만", Asia, false),
    ("YE", "Yemen", "예멘", Asia, false),
    ("TR", "Turkey", "튀르키예", Asia, true),
    ("GE", "Georgia", "조지아", Asia, false),
    ("AM", "Armenia", "아르메니아", Asia, false),
    ("AZ", "Azerbaijan", "아제르바이잔", Asia, false),
    ("CY", "Cyprus", "키프로스", Asia, false),
    // Europe
    ("GB", "United Kingdom", "영국", Europe, true),
    ("IE", "Ireland", "아일랜드", Europe, false),
    ("FR", "France", "프랑스", Europe, true),
    ("DE", "Germany", "독일", Europe, true),
    ("IT", "Italy", "이탈리아", Europe, true),
    ("ES", "Spain", "스페인", Europe, true),
    ("PT", "Portugal", "포르투갈", Europe, true),
    ("NL", "Netherlands", "네덜란드", Europe, true),
    ("BE", "Belgium", "벨기에", Europe, false),
    ("LU", "Luxembourg", "룩셈부르크", Europe, false),
    ("CH", "Switzerland", "스위스", Europe, true),
    ("AT", "Austria", "오스트리아", Europe, true),
    ("LI", "Liechtenstein", "리히텐슈타인", Europe, false),
    ("MC", "Monaco", "모나코", Europe, false),
    ("AD", "Andorra", "안도라", Europe, false),
    ("SM", "San Marino", "산마리노", Europe, false),
    ("VA", "Vatican City", "바티칸", Europe, false),
    ("MT", "Malta", "몰타", Europe, false),
    ("GR", "Greece", "그리스", Europe, true),
    ("CZ", "Czech Republic", "체코", Europe, true),
    ("SK", "Slovakia", "슬로바키아", Europe, false),
    ("PL", "Poland", "폴란드", Europe, false),
    ("HU", "Hungary", "헝가리", Europe, false),
    ("SI", "Slovenia", "슬로베니아", Europe, false),
    ("HR", "Croatia", "크로아티아", Europe, true),
    ("BA", "Bosnia and Herzegovina", "보스니아 헤르체고비나", Europe, false),
    ("RS", "Serbia", "세르비아", Europe, false),
    ("ME", "Montenegro", "몬테네그로", Europe, false),
    ("MK", "North Macedonia", "북마케도니아", Europe, false),
    ("AL", "Albania", "알바니아", Europe, false),
    ("XK", "Kosovo", "코소보", Europe, false),
    ("BG", "Bulgaria", "불가리아", Europe, false),
    ("RO", "Romania", "루마니아", Europe, false),
    ("MD", "Moldova", "몰도바", Europe, false),
    ("UA", "Ukraine", "우크라이나", Europe, false),
    ("BY", "Belarus", "벨라루스", Europe, false),
    ("RU", "Russia", "러시아", Europe, false),
    ("LT", "Lithuania", "리투아니아", Europe, false),
    ("LV", "Latvia", "라트비아", Europe, false),
    ("EE", "Estonia", "에스토니아", Europe, false),
    ("FI", "Finland", "핀란드", Europe, false),
    ("SE", "Sweden", "스웨덴", Europe, false),
    ("NO", "Norway", "노르웨이", Europe, false),
    ("DK", "Denmark", "덴마크", Europe, false),
    ("IS", "Iceland", "아이슬란드", Europe, false),
    // North America
    ("US", "United States", "미국", NorthAmerica, true),
    ("CA", "Canada", "캐나다", NorthAmerica, true),
    ("MX", "Mexico", "멕시코", NorthAmerica, true),
    ("GT", "Guatemala", "과테말라", NorthAmerica, false),
    ("BZ", "Belize", "벨리즈", NorthAmerica, false),
    ("SV", "El Salvador", "엘살바도르", NorthAmerica, false),
    ("HN", "Honduras", "온두라스", NorthAmerica, false),
    ("NI", "Nicaragua", "니카라과", NorthAmerica, false),
    ("CR", "Costa Rica", "코스타리카", NorthAmerica, false),
    ("PA", "Panama", "파나마", NorthAmerica, false),
    ("CU", "Cuba", "쿠바", NorthAmerica, false),
    ("JM", "Jamaica", "자메이카", NorthAmerica, false),
    ("HT", "Haiti", "아이티", NorthAmerica, false),
    ("DO", "Dominican Republic", "도미니카 공화국", NorthAmerica, false),
    ("BS", "Bahamas", "바하마", NorthAmerica, false),
    ("BB", "Barbados", "바베이도스", NorthAmerica, false),
    ("TT", "Trinidad and Tobago", "트리니다드 토바고", NorthAmerica, false),
    ("AG", "Antigua and Barbuda", "앤티가 바부다", NorthAmerica, false),
    ("DM", "Dominica", "도미니카 연방", NorthAmerica, false),
    ("GD", "Grenada", "그레나다", NorthAmerica, false),
    ("KN", "Saint Kitts and Nevis", "세인트키츠 네비스", NorthAmerica, false),
    ("LC", "Saint Lucia", "세인트루시아", NorthAmerica, false),
    ("VC", "Saint Vincent and the Grenadines", "세인트빈센트 그레나딘", NorthAmerica, false),
    // South America
    ("BR", "Brazil", "브라질", SouthAmerica, true),
    ("AR", "Argentina", "아르헨티나", SouthAmerica, true),
    ("CL", "Chile", "칠레", SouthAmerica, false),
    ("PE", "Peru", "페루", SouthAmerica, true),
    ("CO", "Colombia", "콜롬비아", SouthAmerica, false),
    ("VE", "Venezuela", "베네수엘라", SouthAmerica, false),
    ("EC", "Ecuador", "에콰도르", SouthAmerica, false),
    ("BO", "Bolivia", "볼리비아", SouthAmerica, false),
    ("PY", "Paraguay", "파라과이", SouthAmerica, false),
    ("UY", "Uruguay", "우루과이", SouthAmerica, false),
    ("GY", "Guyana", "가이아나", SouthAmerica, false),
    ("SR", "Suriname", "수리남", SouthAmerica, false),
    // Africa
    ("EG", "Egypt", "이집트", Africa, true),
    ("MA", "Morocco", "모로코", Africa, true),
    ("DZ", "Algeria", "알제리", Africa, false),
    ("TN", "Tunisia", "튀니지", Africa, false),
    ("LY", "Libya", "리비아", Africa, false),
    ("SD", "Sudan", "수단", Africa, false),
    ("SS", "South Sudan", "남수단", Africa, false),
    ("ET", "Ethiopia", "에티오피아", Africa, false),
    ("ER", "Eritrea", "에리트레아", Africa, false),
    ("DJ", "Djibouti", "지부티", Africa, false),
    ("SO", "Somalia", "소말리아", Africa, false),
    ("KE", "Kenya", "케냐", Africa, true),
    ("UG", "Uganda", "우간다", Africa, false),
    ("TZ", "Tanzania", "탄자니아", Africa, false),
    ("RW", "Rwanda", "르완다", Africa, false),
    ("BI", "Burundi", "부룬디", Africa, false),
    ("CD", "DR Congo", "콩고민주공화국", Africa, false),
    ("CG", "Republic of the Congo", "콩고 공화국", Africa, false),
    ("GA", "Gabon", "가봉", Africa, false),
    ("GQ", "Equatorial Guinea", "적도 기니", Africa, false),
    ("CM", "Cameroon", "카메룬", Africa, false),
    ("CF", "Central African Republic", "중앙아프리카 공화국", Africa, false),
    ("TD", "Chad", "차드", Africa, false),
    ("NE", "Niger", "니제르", Africa, false),
    ("NG", "Nigeria", "나이지리아", Africa, false),
    ("BJ", "Benin", "베냉", Africa, false),
    ("TG", "Togo", "토고", Africa, false),
    ("GH", "Ghana", "가나", Africa, false),
    ("CI", "Ivory Coast", "코트디부아르", Africa, false),
    ("BF", "Burkina Faso", "부르키나파소", Africa, false),
    ("ML", "Mali", "말리", Africa, false),
    ("SN", "Senegal", "세네갈", Africa, false),
    ("GM", "Gambia", "감비아", Africa, false),
    ("GW", "Guinea-Bissau", "기니비사우", Africa, false),
    ("GN", "Guinea", "기니", Africa, false),
    ("SL", "Sierra Leone", "시에라리온", Africa, false),
    ("LR", "Liberia", "라이베리아", Africa, false),
    ("MR", "Mauritania", "모리타니", Africa, false),
    ("CV", "Cape Verde", "카보베르데", Africa, false),
    ("ST", "Sao Tome and Principe", "상투메 프린시페", Africa, false),
    ("AO", "Angola", "앙골라", Africa, false),
    ("ZM", "Zambia", "잠비아", Africa, false),
    ("ZW", "Zimbabwe", "짐바브웨", Africa, false),
    ("MW", "Malawi", "말라위", Africa, false),
    ("MZ", "Mozambique", "모잠비크", Africa, false),
    ("NA", "Namibia", "나미비아", Africa, false),
    ("BW", "Botswana", "보츠와나", Africa, false),
    ("ZA", "South Africa", "남아프리카 공화국", Africa, true),
    ("LS", "Lesotho", "레소토", Africa, false),
    ("SZ", "Eswatini", "에스와티니", Africa, false),
    ("MG", "Madagascar", "마다가스카르", Africa, false),
    ("MU", "Mauritius", "모리셔스", Africa, false),
    ("SC", "Seychelles", "세이셸", Africa, false),
    ("KM", "Comoros", "코모로", Africa, false),
    // Oceania
    ("AU", "Australia", "호주", Oceania, true),
    ("NZ", "New Zealand", "뉴질랜드", Oceania, true),
    ("FJ", "Fiji", "피지", Oceania, false),
    ("PG", "Papua New Guinea", "파푸아뉴기니", Oceania, false),
    ("SB", "Solomon Islands", "솔로몬 제도", Oceania, false),
    ("VU", "Vanuatu", "바누아투", Oceania, false),
    ("WS", "Samoa", "사모아", Oceania, false),
    ("TO", "Tonga", "통가", Oceania, false),
    ("KI", "Kiribati", "키리바시", Oceania, false),
    ("TV", "Tuvalu", "투발루", Oceania, false),
    ("NR", "Nauru", "나우루", Oceania, false),
    ("PW", "Palau", "팔라우", Oceania, false),
    ("FM", "Micronesia", "미크로네시아", Oceania, false),
    ("MH", "Marshall Islands", "마셜 제도", Oceania, false),
    ("GU", "Guam", "괌", Oceania, true),
];
