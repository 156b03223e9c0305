//! Cities accepted as origin or destination.

/// Fixed city vocabulary shared by origin and destination validation.
pub const CITIES: [&str; 15] = [
    "Lima", "Arequipa", "Trujillo", "Chiclayo", "Piura", "Cusco", "Iquitos", "Huancayo",
    "Pucallpa", "Tacna", "Ayacucho", "Chimbote", "Ica", "Juliaca", "Tarapoto",
];

/// Whether `city` is in the vocabulary (exact, case-sensitive match).
pub fn is_known_city(city: &str) -> bool {
    CITIES.contains(&city)
}
