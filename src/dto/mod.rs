pub mod employer_dto;
pub mod vacancy_dto;
