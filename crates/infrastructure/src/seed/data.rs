//! Static sample data for the seed job

/// City, state, longitude, latitude
pub(super) const CITIES: &[(&str, &str, f64, f64)] = &[
    ("New York", "New York", -73.9866, 40.7306),
    ("Los Angeles", "California", -118.2437, 34.0522),
    ("Chicago", "Illinois", -87.6298, 41.8781),
    ("Houston", "Texas", -95.3698, 29.7604),
    ("Phoenix", "Arizona", -112.074, 33.4484),
    ("Philadelphia", "Pennsylvania", -75.1652, 39.9526),
    ("San Antonio", "Texas", -98.4936, 29.4241),
    ("San Diego", "California", -117.1611, 32.7157),
    ("Dallas", "Texas", -96.797, 32.7767),
    ("San Jose", "California", -121.8863, 37.3382),
    ("Austin", "Texas", -97.7431, 30.2672),
    ("Jacksonville", "Florida", -81.6557, 30.3322),
    ("Fort Worth", "Texas", -97.3308, 32.7555),
    ("Columbus", "Ohio", -82.9988, 39.9612),
    ("Charlotte", "North Carolina", -80.8431, 35.2271),
    ("San Francisco", "California", -122.4194, 37.7749),
    ("Indianapolis", "Indiana", -86.1581, 39.7684),
    ("Seattle", "Washington", -122.3321, 47.6062),
    ("Denver", "Colorado", -104.9903, 39.7392),
    ("Washington", "District of Columbia", -77.0369, 38.9072),
    ("Boston", "Massachusetts", -71.0589, 42.3601),
    ("El Paso", "Texas", -106.485, 31.7619),
    ("Nashville", "Tennessee", -86.7816, 36.1627),
    ("Detroit", "Michigan", -83.0458, 42.3314),
    ("Oklahoma City", "Oklahoma", -97.5164, 35.4676),
    ("Portland", "Oregon", -122.6765, 45.5231),
    ("Las Vegas", "Nevada", -115.1398, 36.1699),
    ("Memphis", "Tennessee", -90.049, 35.1495),
    ("Louisville", "Kentucky", -85.7585, 38.2527),
    ("Baltimore", "Maryland", -76.6122, 39.2904),
    ("Milwaukee", "Wisconsin", -87.9065, 43.0389),
    ("Albuquerque", "New Mexico", -106.6504, 35.0844),
    ("Tucson", "Arizona", -110.9747, 32.2226),
    ("Fresno", "California", -119.7871, 36.7378),
    ("Sacramento", "California", -121.4944, 38.5816),
    ("Kansas City", "Missouri", -94.5786, 39.0997),
    ("Mesa", "Arizona", -111.8315, 33.4152),
    ("Atlanta", "Georgia", -84.388, 33.749),
    ("Omaha", "Nebraska", -95.9345, 41.2565),
    ("Colorado Springs", "Colorado", -104.8214, 38.8339),
    ("Raleigh", "North Carolina", -78.6382, 35.7796),
    ("Miami", "Florida", -80.1918, 25.7617),
    ("Minneapolis", "Minnesota", -93.265, 44.9778),
    ("Tulsa", "Oklahoma", -95.9928, 36.154),
    ("Cleveland", "Ohio", -81.6944, 41.4993),
    ("Wichita", "Kansas", -97.3375, 37.6872),
    ("Arlington", "Texas", -97.1081, 32.7357),
    ("Anchorage", "Alaska", -149.9003, 61.2181),
    ("Boise", "Idaho", -116.2023, 43.615),
    ("Missoula", "Montana", -113.994, 46.8721),
];

pub(super) const DESCRIPTORS: &[&str] = &[
    "Forest",
    "Ancient",
    "Petrified",
    "Roaring",
    "Cascade",
    "Tumbling",
    "Silent",
    "Redwood",
    "Bullfrog",
    "Maple",
    "Misty",
    "Elk",
    "Grizzly",
    "Ocean",
    "Sea",
    "Sky",
    "Dusty",
    "Diamond",
];

pub(super) const PLACES: &[&str] = &[
    "Flats",
    "Village",
    "Canyon",
    "Pond",
    "Group Camp",
    "Horse Camp",
    "Ghost Town",
    "Camp",
    "Dispersed Camp",
    "Backcountry",
    "River",
    "Creek",
    "Creekside",
    "Bay",
    "Spring",
    "Bayshore",
    "Sands",
    "Mule Camp",
    "Hunting Camp",
    "Cliffs",
    "Hollow",
];

pub(super) const DESCRIPTION: &str =
    "Lorem ipsum dolor, sit amet consectetur adipisicing elit. Vero ullam, doloribus quos \
     maiores assumenda dolorum animi accusantium facere, quisquam odio dicta laudantium \
     eligendi. Excepturi, laboriosam aperiam dolore ad illum eum?";

pub(super) const IMAGE_URL: &str =
    "https://res.cloudinary.com/dugafolvh/image/upload/v1756315168/Basecamp/xnn866hs4itoxzhiu2hi.png";

pub(super) const IMAGE_FILENAME: &str = "Basecamp/xnn866hs4itoxzhiu2hi";
